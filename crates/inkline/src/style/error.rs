//! Style definition errors.
//!
//! These errors describe misuse of the style registry. They are always
//! reported to the caller, regardless of the formatter's silent setting.

use thiserror::Error;

/// Error returned when a style definition is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// The name belongs to a built-in terminal style.
    #[error("cannot use \"{name}\" as a custom style name as it would shadow a terminal style")]
    ReservedName { name: String },

    /// The value references another custom style.
    #[error("style \"{name}\" references custom style \"{token}\": nesting of custom styles is not supported")]
    Nesting { name: String, token: String },

    /// The value is neither a string nor a removal sentinel.
    #[error("style \"{name}\": only strings are supported as style values")]
    TypeKind { name: String },

    /// A style table key that is not a string.
    #[error("style names must be strings, got {key}")]
    InvalidName { key: String },
}
