//! Directive translation.
//!
//! Templates are written in a small mustache-style grammar:
//!
//! | directive | meaning |
//! |-----------|---------|
//! | `{{#C bold red}}text{{/C}}` | style the enclosed text |
//! | `{{B warn}}`, `{{E ok}}` | banner and footer helpers |
//! | `{{BW}}`, `{{EO}}` | shortcut helpers |
//! | `{{field}}` | context lookup |
//! | `{{! note }}` | comment, dropped |
//!
//! [`translate`] lowers this grammar to MiniJinja source: blocks become
//! `{% filter %}` blocks, helpers become function calls and everything else
//! is passed through as an expression.
//!
//! ```rust
//! use inkline::template::translate;
//!
//! let out = translate("{{#C bold red}}Hi {{name}}{{/C}}", |_| false).unwrap();
//! assert_eq!(out, r#"{% filter C("bold red") %}Hi {{ name }}{% endfilter %}"#);
//!
//! let out = translate("{{B \"info\" \"red\"}}", |name| name == "B").unwrap();
//! assert_eq!(out, r#"{{ B("info", "red") }}"#);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("valid number pattern"));
static PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z0-9_]+)*$").expect("valid path pattern")
});

/// Helpers whose unquoted argument list is taken as one string.
const LITERAL_ARGUMENT_HELPERS: &[&str] = &["C", "B", "E"];

/// A directive that cannot be lowered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("unterminated directive starting at byte {offset}")]
    Unterminated { offset: usize },

    #[error("block '{name}' is never closed")]
    Unclosed { name: String },

    #[error("block '{open}' closed by '{close}'")]
    Mismatched { open: String, close: String },

    #[error("closing '{name}' without an open block")]
    Unopened { name: String },

    #[error("empty directive")]
    Empty,

    #[error("invalid argument '{arg}' for '{name}'")]
    InvalidArgument { name: String, arg: String },

    #[error("unterminated string in arguments of '{name}'")]
    UnterminatedString { name: String },
}

enum Mustache<'a> {
    Comment,
    Tag(&'a str),
}

/// Lowers `source` to MiniJinja syntax.
///
/// `is_helper` decides whether `{{NAME ...}}` is a helper call or a plain
/// expression.
pub fn translate<F>(source: &str, is_helper: F) -> Result<String, DirectiveError>
where
    F: Fn(&str) -> bool,
{
    let mut out = String::with_capacity(source.len() + 16);
    let mut open: Vec<String> = Vec::new();
    let mut rest = source;
    let mut offset = 0;

    while let Some(start) = rest.find("{{") {
        push_text(&mut out, &rest[..start]);

        let (mustache, consumed) = split_mustache(&rest[start..]).ok_or(
            DirectiveError::Unterminated {
                offset: offset + start,
            },
        )?;
        if let Mustache::Tag(tag) = mustache {
            push_tag(&mut out, &mut open, tag.trim(), &is_helper)?;
        }

        offset += start + consumed;
        rest = &rest[start + consumed..];
    }
    push_text(&mut out, rest);

    if let Some(name) = open.pop() {
        return Err(DirectiveError::Unclosed { name });
    }

    tracing::trace!(source, translated = %out, "translated directives");
    Ok(out)
}

/// Splits the mustache at the start of `s`, returning it and its byte length.
fn split_mustache(s: &str) -> Option<(Mustache<'_>, usize)> {
    if s.starts_with("{{!--") {
        let end = s[5..].find("--}}")?;
        return Some((Mustache::Comment, 5 + end + 4));
    }
    if s.starts_with("{{{") {
        let end = s[3..].find("}}}")?;
        return Some((Mustache::Tag(&s[3..3 + end]), 3 + end + 3));
    }

    let end = s[2..].find("}}")?;
    let inner = &s[2..2 + end];
    if inner.trim_start().starts_with('!') {
        Some((Mustache::Comment, 2 + end + 2))
    } else {
        Some((Mustache::Tag(inner), 2 + end + 2))
    }
}

fn push_tag<F>(
    out: &mut String,
    open: &mut Vec<String>,
    tag: &str,
    is_helper: &F,
) -> Result<(), DirectiveError>
where
    F: Fn(&str) -> bool,
{
    if let Some(block) = tag.strip_prefix('#') {
        let (name, args) = split_name(block);
        if name.is_empty() {
            return Err(DirectiveError::Empty);
        }
        let args = arguments(name, args)?;
        out.push_str(&format!("{{% filter {}({}) %}}", name, args));
        open.push(name.to_string());
        return Ok(());
    }

    if let Some(close) = tag.strip_prefix('/') {
        let close = close.trim();
        return match open.pop() {
            None => Err(DirectiveError::Unopened {
                name: close.to_string(),
            }),
            Some(name) if name != close => Err(DirectiveError::Mismatched {
                open: name,
                close: close.to_string(),
            }),
            Some(_) => {
                out.push_str("{% endfilter %}");
                Ok(())
            }
        };
    }

    let (name, args) = split_name(tag);
    if name.is_empty() {
        return Err(DirectiveError::Empty);
    }
    if is_helper(name) {
        let args = arguments(name, args)?;
        out.push_str(&format!("{{{{ {}({}) }}}}", name, args));
    } else {
        out.push_str("{{ ");
        out.push_str(tag);
        out.push_str(" }}");
    }
    Ok(())
}

fn split_name(tag: &str) -> (&str, &str) {
    let tag = tag.trim();
    match tag.find(char::is_whitespace) {
        Some(idx) => (&tag[..idx], tag[idx..].trim()),
        None => (tag, ""),
    }
}

/// Converts a helper argument list to a MiniJinja argument list.
fn arguments(name: &str, raw: &str) -> Result<String, DirectiveError> {
    if raw.is_empty() {
        return Ok(String::new());
    }
    if LITERAL_ARGUMENT_HELPERS.contains(&name) && !raw.starts_with(['"', '\'']) {
        return Ok(quote(raw));
    }

    let mut exprs = Vec::new();
    let mut chars = raw.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c == '"' || c == '\'' {
            chars.next();
            let mut value = String::new();
            let mut closed = false;
            while let Some(c2) = chars.next() {
                match c2 {
                    '\\' => match chars.next() {
                        Some('n') => value.push('\n'),
                        Some('r') => value.push('\r'),
                        Some('t') => value.push('\t'),
                        Some(other) => value.push(other),
                        None => break,
                    },
                    q if q == c => {
                        closed = true;
                        break;
                    }
                    other => value.push(other),
                }
            }
            if !closed {
                return Err(DirectiveError::UnterminatedString {
                    name: name.to_string(),
                });
            }
            exprs.push(quote(&value));
            continue;
        }

        let mut word = String::new();
        while let Some(&c2) = chars.peek() {
            if c2.is_whitespace() {
                break;
            }
            word.push(c2);
            chars.next();
        }
        exprs.push(bare_argument(name, &word)?);
    }

    Ok(exprs.join(", "))
}

fn bare_argument(name: &str, word: &str) -> Result<String, DirectiveError> {
    match word {
        "true" | "false" => Ok(word.to_string()),
        "null" | "undefined" => Ok("none".to_string()),
        _ if NUMBER.is_match(word) || PATH.is_match(word) => Ok(word.to_string()),
        _ => Err(DirectiveError::InvalidArgument {
            name: name.to_string(),
            arg: word.to_string(),
        }),
    }
}

/// Renders `value` as a double-quoted MiniJinja string literal.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Appends literal text, escaping anything MiniJinja would read as a tag.
fn push_text(out: &mut String, text: &str) {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        // A brace right before a directive would merge with it.
        if c == '{' && matches!(chars.peek().copied(), Some('%') | Some('#') | None) {
            out.push_str("{{ \"{\" }}");
        } else {
            out.push(c);
        }
    }
}
