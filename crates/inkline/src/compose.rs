//! Composition of style tokens into escape sequences.
//!
//! Encoded colors and palette styles are applied differently:
//!
//! - encoded colors wrap the content immediately, token by token, each wrap
//!   nesting outside the previous one
//! - palette styles are collected into a pipeline and applied once, after all
//!   tokens have been seen, with the first style outermost
//!
//! ```rust
//! use inkline::compose::apply_styles;
//!
//! assert_eq!(
//!     apply_styles(["i#196"], "MESSAGE"),
//!     "\x1b[38;5;196mMESSAGE\x1b[39m"
//! );
//! assert_eq!(
//!     apply_styles(["bold", "x#045"], "MESSAGE"),
//!     "\x1b[1m\x1b[38;5;45mMESSAGE\x1b[39m\x1b[22m"
//! );
//! ```

use crate::style::palette::{self, NamedStyle};
use crate::style::StyleToken;

/// Applies `tokens`, in order, to `content`.
///
/// Unknown tokens are ignored. With no recognized token the content comes
/// back unchanged.
pub fn apply_styles<I, S>(tokens: I, content: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut output = content.to_string();
    let mut pipeline: Vec<NamedStyle> = Vec::new();

    for token in tokens {
        match StyleToken::classify(token.as_ref()) {
            StyleToken::Indexed { color, layer }
            | StyleToken::Cube { color, layer }
            | StyleToken::Hex { color, layer } => output = color.paint(&output, layer),
            StyleToken::Named(style) => pipeline.push(style),
            StyleToken::Inert => {}
        }
    }

    palette::apply_all(&pipeline, &output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_foreground_and_background() {
        assert_eq!(
            apply_styles(["i#196"], "MESSAGE"),
            "\x1b[38;5;196mMESSAGE\x1b[39m"
        );
        assert_eq!(
            apply_styles(["I#046"], "MESSAGE"),
            "\x1b[48;5;46mMESSAGE\x1b[49m"
        );
    }

    #[test]
    fn test_hex() {
        assert_eq!(
            apply_styles(["h#FF0000"], "MESSAGE"),
            "\x1b[38;2;255;0;0mMESSAGE\x1b[39m"
        );
    }

    #[test]
    fn test_encoded_colors_nest_in_token_order() {
        assert_eq!(
            apply_styles(["i#196", "I#046"], "MESSAGE"),
            "\x1b[48;5;46m\x1b[38;5;196mMESSAGE\x1b[39m\x1b[49m"
        );
        assert_eq!(
            apply_styles(["x#500", "X#050"], "MESSAGE"),
            "\x1b[48;5;46m\x1b[38;5;196mMESSAGE\x1b[39m\x1b[49m"
        );
        assert_eq!(
            apply_styles(["h#FF0000", "H#00FF00"], "MESSAGE"),
            "\x1b[48;2;0;255;0m\x1b[38;2;255;0;0mMESSAGE\x1b[39m\x1b[49m"
        );
    }

    #[test]
    fn test_named_pipeline_applied_after_colors() {
        // bold is listed first but still wraps the encoded color
        assert_eq!(
            apply_styles(["bold", "x#303"], "MESSAGE"),
            "\x1b[1m\x1b[38;5;127mMESSAGE\x1b[39m\x1b[22m"
        );
    }

    #[test]
    fn test_named_styles_first_is_outermost() {
        assert_eq!(
            apply_styles(["bold", "blue"], "["),
            "\x1b[1m\x1b[34m[\x1b[39m\x1b[22m"
        );
    }

    #[test]
    fn test_inert_tokens_ignored() {
        assert_eq!(apply_styles(["", "other", "i#12"], "MESSAGE"), "MESSAGE");
        assert_eq!(apply_styles(Vec::<String>::new(), "MESSAGE"), "MESSAGE");
    }
}
