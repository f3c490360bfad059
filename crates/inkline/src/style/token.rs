//! Style token classification.
//!
//! A style argument is a whitespace-separated list of tokens. Each token is
//! classified exactly once into a [`StyleToken`]; the composition engine then
//! matches on the variant instead of re-running patterns.

use once_cell::sync::Lazy;
use regex::Regex;

use super::color::{AnsiColor, Layer};
use super::palette::{self, NamedStyle};

static INDEXED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[iI]#([0-9]{3})$").expect("valid indexed pattern"));
static CUBE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[xX]#([0-9])([0-9])([0-9])$").expect("valid cube pattern"));
static HEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[hH]#([0-9A-Fa-f]{6})$").expect("valid hex pattern"));

/// A classified style token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleToken {
    /// `i#NNN` / `I#NNN`
    Indexed { color: AnsiColor, layer: Layer },
    /// `x#RGB` / `X#RGB`
    Cube { color: AnsiColor, layer: Layer },
    /// `h#RRGGBB` / `H#RRGGBB`
    Hex { color: AnsiColor, layer: Layer },
    /// A palette style such as `bold` or `bgBlue`.
    Named(NamedStyle),
    /// Anything else. Unknown tokens are ignored rather than rejected.
    Inert,
}

impl StyleToken {
    /// Classifies a single token.
    pub fn classify(token: &str) -> Self {
        let Some(prefix) = token.chars().next() else {
            return StyleToken::Inert;
        };
        let layer = Layer::from_prefix(prefix);

        if let Some(caps) = INDEXED.captures(token) {
            return StyleToken::Indexed {
                color: AnsiColor::indexed(&caps[1]),
                layer,
            };
        }
        if let Some(caps) = CUBE.captures(token) {
            return StyleToken::Cube {
                color: AnsiColor::cube(&caps[1], &caps[2], &caps[3]),
                layer,
            };
        }
        if let Some(caps) = HEX.captures(token) {
            return StyleToken::Hex {
                color: AnsiColor::hex(&caps[1]),
                layer,
            };
        }
        match palette::lookup(token) {
            Some(style) => StyleToken::Named(style),
            None => StyleToken::Inert,
        }
    }

    /// Returns true for the three encoded color grammars.
    pub fn is_encoded_color(&self) -> bool {
        matches!(
            self,
            StyleToken::Indexed { .. } | StyleToken::Cube { .. } | StyleToken::Hex { .. }
        )
    }
}
