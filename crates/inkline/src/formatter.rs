//! The formatter handle.

use std::io::{self, Write};
use std::sync::Arc;

use serde::Serialize;

use crate::config::Config;
use crate::error::FormatError;
use crate::style::{StyleError, StyleRegistry, StyleRequest};
use crate::template::Composer;
use crate::util::{strip_ansi, strip_colors};

/// Formats directive templates into styled terminal strings.
///
/// Formatting borrows the handle immutably. Changing styles, brackets or
/// shortcuts needs `&mut self`, so a definition can never race with a render
/// that is reading the tables.
///
/// # Example
///
/// ```rust
/// use inkline::Inkline;
/// use std::collections::HashMap;
///
/// let mut ink = Inkline::new();
/// ink.set_columns(Some(80));
///
/// let mut ctx = HashMap::new();
/// ctx.insert("name", "world");
///
/// let out = ink.format("{{#C red}}Hello {{name}}{{/C}}", &ctx).unwrap();
/// assert_eq!(out, "\x1b[31mHello world\x1b[39m");
///
/// let out = ink.plain_format("{{B warn}} Disk almost full", &()).unwrap();
/// assert_eq!(out, "[ WARN] Disk almost full");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inkline {
    composer: Arc<Composer>,
    silent: bool,
}

impl Default for Inkline {
    fn default() -> Self {
        Self {
            composer: Arc::new(Composer::new()),
            silent: true,
        }
    }
}

impl Inkline {
    /// Creates a formatter with the default styles, brackets and shortcuts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a formatter from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Style`] if a style entry is rejected.
    pub fn from_config(config: Config) -> Result<Self, FormatError> {
        let mut inkline = Self::new();
        inkline.silent = config.silent;

        let composer = Arc::make_mut(&mut inkline.composer);
        composer.set_brackets(config.opening_bracket, config.closing_bracket);
        composer.set_columns(config.columns);

        for (key, value) in &config.styles {
            let name = key.as_str().ok_or_else(|| StyleError::InvalidName {
                key: format!("{:?}", key),
            })?;
            composer.styles_mut().manage(name, value)?;
        }

        for (code, name) in config.shortcuts {
            match name {
                Some(name) => composer.set_shortcut(code, name),
                None => {
                    composer.remove_shortcut(&code);
                }
            }
        }

        Ok(inkline)
    }

    /// Expands `template` with `context`.
    ///
    /// When expansion fails and the formatter is silent, the unexpanded
    /// template is returned instead of the error.
    ///
    /// # Errors
    ///
    /// Returns the expansion error when the formatter is not silent.
    pub fn format<S>(&self, template: &str, context: &S) -> Result<String, FormatError>
    where
        S: Serialize + ?Sized,
    {
        match Arc::clone(&self.composer).render(template, context) {
            Ok(output) => Ok(output),
            Err(err) if self.silent && err.is_expansion() => {
                tracing::warn!(error = %err, "template expansion failed, returning input");
                Ok(template.to_string())
            }
            Err(err) => Err(err),
        }
    }

    /// Concatenates `parts` and expands the result as one template.
    pub fn format_parts<I, P, S>(&self, parts: I, context: &S) -> Result<String, FormatError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
        S: Serialize + ?Sized,
    {
        let template: String = parts.into_iter().map(|part| part.as_ref().to_string()).collect();
        self.format(&template, context)
    }

    /// Like [`format`](Self::format), with color codes removed.
    ///
    /// Cursor movement is kept, so footers stay right-aligned.
    pub fn format_no_color<S>(&self, template: &str, context: &S) -> Result<String, FormatError>
    where
        S: Serialize + ?Sized,
    {
        self.format(template, context).map(|out| strip_colors(&out))
    }

    /// Like [`format`](Self::format), with every escape sequence removed.
    pub fn plain_format<S>(&self, template: &str, context: &S) -> Result<String, FormatError>
    where
        S: Serialize + ?Sized,
    {
        self.format(template, context).map(|out| strip_ansi(&out))
    }

    /// Formats and writes a line to stdout.
    pub fn log<S>(&self, template: &str, context: &S) -> Result<(), FormatError>
    where
        S: Serialize + ?Sized,
    {
        self.write_line(&mut io::stdout().lock(), template, context)
    }

    /// Formats and writes a line to stderr.
    pub fn error<S>(&self, template: &str, context: &S) -> Result<(), FormatError>
    where
        S: Serialize + ?Sized,
    {
        self.write_line(&mut io::stderr().lock(), template, context)
    }

    /// Formats and writes a line to `writer`.
    pub fn write_line<W, S>(&self, writer: &mut W, template: &str, context: &S) -> Result<(), FormatError>
    where
        W: Write + ?Sized,
        S: Serialize + ?Sized,
    {
        let output = self.format(template, context)?;
        writeln!(writer, "{}", output)?;
        Ok(())
    }

    /// Styles `content` directly, without a template.
    ///
    /// ```rust
    /// let ink = inkline::Inkline::new();
    /// assert_eq!(ink.apply("warn", "careful"), "\x1b[1m\x1b[33mcareful\x1b[39m\x1b[22m");
    /// ```
    pub fn apply(&self, styles: &str, content: &str) -> String {
        self.composer.paint(styles, content)
    }

    /// Returns the value of a custom style.
    pub fn style(&self, name: &str) -> Option<&str> {
        self.composer.styles().get(name)
    }

    pub fn styles(&self) -> &StyleRegistry {
        self.composer.styles()
    }

    /// Defines a custom style. See [`StyleRegistry::define`].
    pub fn define_style(&mut self, name: &str, value: &str) -> Result<Option<String>, StyleError> {
        self.composer_mut().styles_mut().define(name, value)
    }

    /// Removes a custom style, returning its previous value.
    pub fn remove_style(&mut self, name: &str) -> Option<String> {
        self.composer_mut().styles_mut().remove(name)
    }

    /// Queries, removes or defines a style. See [`StyleRegistry::manage`].
    pub fn manage_style(
        &mut self,
        name: &str,
        request: impl Into<StyleRequest>,
    ) -> Result<Option<String>, StyleError> {
        match request.into() {
            StyleRequest::Query => Ok(self.style(name).map(str::to_string)),
            request => self.composer_mut().styles_mut().manage(name, request),
        }
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn set_silent(&mut self, silent: bool) {
        self.silent = silent;
    }

    pub fn opening_bracket(&self) -> &str {
        self.composer.opening_bracket()
    }

    pub fn closing_bracket(&self) -> &str {
        self.composer.closing_bracket()
    }

    /// Replaces the bracket templates used by banners and footers.
    pub fn set_brackets(&mut self, opening: impl Into<String>, closing: impl Into<String>) {
        self.composer_mut().set_brackets(opening, closing);
    }

    /// Maps a shortcut code to a status name, e.g. `("N", "note")` for `{{BN}}`.
    pub fn set_shortcut(&mut self, code: impl Into<String>, name: impl Into<String>) {
        self.composer_mut().set_shortcut(code, name);
    }

    pub fn remove_shortcut(&mut self, code: &str) -> Option<String> {
        self.composer_mut().remove_shortcut(code)
    }

    /// Fixes the footer width, or asks the terminal with `None`.
    pub fn set_columns(&mut self, columns: Option<usize>) {
        self.composer_mut().set_columns(columns);
    }

    /// Footer width in effect.
    pub fn columns(&self) -> usize {
        self.composer.columns()
    }

    fn composer_mut(&mut self) -> &mut Composer {
        Arc::make_mut(&mut self.composer)
    }
}
