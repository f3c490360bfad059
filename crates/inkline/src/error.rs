//! Error types for formatting.
//!
//! [`FormatError`] is returned by every formatting entry point. It abstracts
//! over the template engine's errors so callers never depend on minijinja
//! directly.

use thiserror::Error;

use crate::style::StyleError;
use crate::template::DirectiveError;

/// Error type for formatting operations.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Template syntax error or failed expansion.
    #[error("template error: {0}")]
    Template(String),

    /// A helper failed while the template was being expanded.
    #[error("{0}")]
    Operation(String),

    /// A directive could not be translated.
    #[error(transparent)]
    Directive(#[from] DirectiveError),

    /// A style definition was rejected.
    #[error(transparent)]
    Style(#[from] StyleError),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Writing formatted output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormatError {
    /// Returns true for errors raised while expanding a template.
    ///
    /// Only these are swallowed in silent mode; style and configuration
    /// errors always reach the caller.
    pub fn is_expansion(&self) -> bool {
        matches!(
            self,
            FormatError::Template(_) | FormatError::Operation(_) | FormatError::Directive(_)
        )
    }
}

impl From<serde_yaml::Error> for FormatError {
    fn from(err: serde_yaml::Error) -> Self {
        FormatError::Config(err.to_string())
    }
}

impl From<minijinja::Error> for FormatError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::SyntaxError
            | ErrorKind::BadEscape
            | ErrorKind::UndefinedError
            | ErrorKind::UnknownTest
            | ErrorKind::UnknownFunction
            | ErrorKind::UnknownFilter
            | ErrorKind::UnknownMethod => FormatError::Template(err.to_string()),
            _ => FormatError::Operation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FormatError::Template("unexpected end of input".to_string());
        assert!(err.to_string().contains("template error"));
        assert!(err.to_string().contains("unexpected end"));
    }

    #[test]
    fn test_from_minijinja_syntax_error() {
        let mj_err = minijinja::Error::new(minijinja::ErrorKind::SyntaxError, "bad");
        let err: FormatError = mj_err.into();
        assert!(matches!(err, FormatError::Template(_)));
        assert!(err.is_expansion());
    }

    #[test]
    fn test_from_minijinja_other_error() {
        let mj_err = minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, "boom");
        let err: FormatError = mj_err.into();
        assert!(matches!(err, FormatError::Operation(_)));
        assert!(err.is_expansion());
    }

    #[test]
    fn test_style_and_io_errors_are_not_expansion_errors() {
        let err: FormatError = StyleError::ReservedName {
            name: "red".to_string(),
        }
        .into();
        assert!(!err.is_expansion());

        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: FormatError = io_err.into();
        assert!(matches!(err, FormatError::Io(_)));
        assert!(!err.is_expansion());
    }
}
