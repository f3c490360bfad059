//! Banner and footer status tags.
//!
//! A banner is a left-aligned bracketed tag such as `[ WARN]`. A footer is a
//! right-aligned tag such as `[ OK ]`: it moves to the start of a fresh line,
//! goes back up one line and then right by enough columns for the tag to end
//! at the terminal's right edge.
//!
//! Both take the same argument list. The last argument is the style string,
//! the others joined by spaces are the text. With a single argument the style
//! doubles as the text, so `{{B warn}}` renders `WARN` in the `warn` style.

use crate::style::palette::{self, BOLD, GREEN};
use crate::util::visible_width;

/// Minimum banner width, reached by left padding.
pub const BANNER_WIDTH: usize = 5;

/// What the status tags need from the formatter that renders them.
pub trait StatusContext {
    type Error;

    /// Styles `content` with a raw style string.
    fn paint(&self, styles: &str, content: &str) -> String;

    /// Expands the opening and closing bracket templates.
    fn brackets(&self) -> Result<(String, String), Self::Error>;

    /// Terminal width used to right-align footers.
    fn columns(&self) -> usize;
}

/// Splits helper arguments into `(text, styles)`.
///
/// Returns `None` when there is no style argument or it is empty.
pub fn split_arguments<S: AsRef<str>>(args: &[S]) -> Option<(String, String)> {
    let (styles, text) = args.split_last()?;
    let styles = styles.as_ref();
    if styles.is_empty() {
        return None;
    }

    let text = text
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(" ");
    let text = if text.is_empty() {
        styles.to_string()
    } else {
        text
    };
    Some((text, styles.to_string()))
}

/// Renders a banner tag.
///
/// ```rust
/// # use inkline::template::{banner, StatusContext};
/// struct Plain;
///
/// impl StatusContext for Plain {
///     type Error = ();
///     fn paint(&self, _styles: &str, content: &str) -> String { content.to_string() }
///     fn brackets(&self) -> Result<(String, String), ()> { Ok(("[".into(), "]".into())) }
///     fn columns(&self) -> usize { 80 }
/// }
///
/// assert_eq!(banner(&Plain, &["warn"]).unwrap(), "[\x1b[1m WARN\x1b[22m]");
/// ```
pub fn banner<C, S>(ctx: &C, args: &[S]) -> Result<String, C::Error>
where
    C: StatusContext + ?Sized,
    S: AsRef<str>,
{
    let Some((text, styles)) = split_arguments(args) else {
        return Ok(String::new());
    };

    let text = format!("{:>width$}", text, width = BANNER_WIDTH).to_uppercase();
    let mut inner = ctx.paint(&styles, &text);
    if !inner.contains('\x1b') {
        inner = BOLD.apply(&inner);
    }

    let (open, close) = ctx.brackets()?;
    Ok(format!("{}{}{}", open, inner, close))
}

/// Renders a footer tag, right-aligned at [`StatusContext::columns`].
///
/// The offset is the column count minus the tag's display width, so wide
/// characters take two columns. It is not clamped: a footer wider than the
/// terminal produces a negative offset. Padding still counts chars.
pub fn footer<C, S>(ctx: &C, args: &[S]) -> Result<String, C::Error>
where
    C: StatusContext + ?Sized,
    S: AsRef<str>,
{
    let Some((text, styles)) = split_arguments(args) else {
        return Ok(String::new());
    };

    let text = match text.chars().count() {
        1 => format!(" {}  ", text),
        2 => format!(" {} ", text),
        3 => format!(" {}", text),
        _ => text,
    }
    .to_uppercase();

    let mut inner = ctx.paint(&styles, &text);
    if !inner.contains('\x1b') {
        inner = palette::apply_all(&[BOLD, GREEN], &inner);
    }

    let (open, close) = ctx.brackets()?;
    let tag = format!("{}{}{}", open, inner, close);
    let span = ctx.columns() as i64 - visible_width(&tag) as i64;
    Ok(format!("\n\x1b[1A\x1b[{}C{}", span, tag))
}
