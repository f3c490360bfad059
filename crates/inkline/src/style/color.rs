//! Encoded color spans.
//!
//! Three compact color grammars can appear among style tokens:
//!
//! - `i#NNN`: a 256-color palette index given as three decimal digits
//! - `x#RGB`: a position in the 6×6×6 color cube, one digit per channel
//! - `h#RRGGBB`: a 24-bit hex color
//!
//! A lowercase prefix paints the foreground, an uppercase one the background.
//! Components that fail to parse count as 0; nothing here ever errors.
//!
//! # Example
//!
//! ```rust
//! use inkline::style::color::{encode_cube, encode_hex, Layer};
//!
//! assert_eq!(
//!     encode_cube("MESSAGE", "5", "0", "0", Layer::Foreground),
//!     "\x1b[38;5;196mMESSAGE\x1b[39m"
//! );
//! assert_eq!(
//!     encode_hex("MESSAGE", "00FF00", Layer::Background),
//!     "\x1b[48;2;0;255;0mMESSAGE\x1b[49m"
//! );
//! ```

use std::fmt;

/// SGR color type for the 256-color palette.
pub const PALETTE_TYPE: u8 = 5;

/// SGR color type for 24-bit RGB.
pub const RGB_TYPE: u8 = 2;

const CUBE_BASE: u32 = 16;
const CUBE_RED: u32 = 36;
const CUBE_GREEN: u32 = 6;

/// Which side of the glyph a color applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Foreground,
    Background,
}

impl Layer {
    /// Picks the layer from a token prefix: uppercase means background.
    pub fn from_prefix(prefix: char) -> Self {
        if prefix.is_ascii_uppercase() {
            Layer::Background
        } else {
            Layer::Foreground
        }
    }

    fn open_tag(self) -> u8 {
        match self {
            Layer::Foreground => 38,
            Layer::Background => 48,
        }
    }

    fn close_tag(self) -> u8 {
        self.open_tag() + 1
    }
}

/// A decoded color, ready to be turned into SGR parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    /// 256-color palette index. Not clamped: cube digits above 5 overflow
    /// the nominal range and are emitted as computed.
    Palette(u32),
    /// True color RGB.
    Rgb(u8, u8, u8),
}

impl AnsiColor {
    /// Builds a palette color from decimal index digits.
    pub fn indexed(digits: &str) -> Self {
        AnsiColor::Palette(parse_component(digits, 10))
    }

    /// Builds a palette color from three color cube coordinates.
    pub fn cube(r: &str, g: &str, b: &str) -> Self {
        let (r, g, b) = (
            parse_component(r, 10),
            parse_component(g, 10),
            parse_component(b, 10),
        );
        AnsiColor::Palette(CUBE_BASE + r * CUBE_RED + g * CUBE_GREEN + b)
    }

    /// Builds an RGB color from six hex digits.
    pub fn hex(hex: &str) -> Self {
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|part| u8::from_str_radix(part, 16).ok())
                .unwrap_or(0)
        };
        AnsiColor::Rgb(channel(0..2), channel(2..4), channel(4..6))
    }

    /// The SGR color type code (`5` or `2`).
    pub fn type_code(&self) -> u8 {
        match self {
            AnsiColor::Palette(_) => PALETTE_TYPE,
            AnsiColor::Rgb(..) => RGB_TYPE,
        }
    }

    /// Wraps `text` in this color on the given layer.
    pub fn paint(&self, text: &str, layer: Layer) -> String {
        wrap_with_ansi(text, self, self.type_code(), layer)
    }
}

impl fmt::Display for AnsiColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnsiColor::Palette(index) => write!(f, "{}", index),
            AnsiColor::Rgb(r, g, b) => write!(f, "{};{};{}", r, g, b),
        }
    }
}

fn parse_component(value: &str, radix: u32) -> u32 {
    u32::from_str_radix(value, radix).unwrap_or(0)
}

/// Wraps `text` with `ESC[38;type;param m` ... `ESC[39m` (48/49 for background).
///
/// An inner close on the same layer is replaced by this color's open, so a
/// nested span does not end the outer one early.
pub fn wrap_with_ansi(text: &str, param: impl fmt::Display, type_code: u8, layer: Layer) -> String {
    let open = format!("\x1b[{};{};{}m", layer.open_tag(), type_code, param);
    let close = format!("\x1b[{}m", layer.close_tag());
    let body = text.replace(&close, &open);
    format!("{}{}{}", open, body, close)
}

/// Paints `text` with a palette index given as decimal digits.
pub fn encode_indexed(text: &str, digits: &str, layer: Layer) -> String {
    AnsiColor::indexed(digits).paint(text, layer)
}

/// Paints `text` with the color cube entry `16 + 36r + 6g + b`.
pub fn encode_cube(text: &str, r: &str, g: &str, b: &str, layer: Layer) -> String {
    AnsiColor::cube(r, g, b).paint(text, layer)
}

/// Paints `text` with a 24-bit color given as six hex digits.
pub fn encode_hex(text: &str, hex: &str, layer: Layer) -> String {
    AnsiColor::hex(hex).paint(text, layer)
}
