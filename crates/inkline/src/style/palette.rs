//! Named terminal styles.
//!
//! The palette is the fixed table of styles a terminal understands by name:
//! modifiers (`bold`, `underline`, ...), the sixteen foreground colors and
//! their background counterparts (`bgRed`, `bgBlueBright`, ...). Every entry
//! carries the SGR code that opens it and the code that closes it.
//!
//! Names in this table are reserved: a custom style can never shadow them.
//!
//! # Nesting
//!
//! Closing codes are shared (every foreground color closes with `39`), so a
//! naive wrap would terminate the outer color at the first inner close. When
//! [`NamedStyle::apply`] wraps text that already contains its own close code,
//! it replaces that code with its own open code:
//!
//! ```rust
//! use inkline::style::palette;
//!
//! let red = palette::lookup("red").unwrap();
//! let yellow = palette::lookup("yellow").unwrap();
//!
//! let inner = yellow.apply("INNER");
//! let outer = red.apply(&format!("A{}B", inner));
//! assert_eq!(
//!     outer,
//!     "\x1b[31mA\x1b[33mINNER\x1b[31mB\x1b[39m"
//! );
//! ```

/// A palette entry: a style name and its SGR open/close codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedStyle {
    name: &'static str,
    open: u8,
    close: u8,
}

impl NamedStyle {
    const fn new(name: &'static str, open: u8, close: u8) -> Self {
        Self { name, open, close }
    }

    /// The palette name of this style.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The escape sequence that turns this style on.
    pub fn open_sequence(&self) -> String {
        format!("\x1b[{}m", self.open)
    }

    /// The escape sequence that turns this style off.
    pub fn close_sequence(&self) -> String {
        format!("\x1b[{}m", self.close)
    }

    /// Wraps `text` with this style. An inner close becomes this style's open.
    pub fn apply(&self, text: &str) -> String {
        let open = self.open_sequence();
        let close = self.close_sequence();
        let body = text.replace(&close, &open);
        format!("{}{}{}", open, body, close)
    }
}

/// Bold, the fallback style for banners.
pub const BOLD: NamedStyle = NamedStyle::new("bold", 1, 22);

/// Green, combined with [`BOLD`] as the fallback style for footers.
pub const GREEN: NamedStyle = NamedStyle::new("green", 32, 39);

/// Every style the palette knows, in lookup order.
pub const STYLES: &[NamedStyle] = &[
    // Modifiers
    NamedStyle::new("reset", 0, 0),
    BOLD,
    NamedStyle::new("dim", 2, 22),
    NamedStyle::new("italic", 3, 23),
    NamedStyle::new("underline", 4, 24),
    NamedStyle::new("inverse", 7, 27),
    NamedStyle::new("hidden", 8, 28),
    NamedStyle::new("strikethrough", 9, 29),
    // Foreground
    NamedStyle::new("black", 30, 39),
    NamedStyle::new("red", 31, 39),
    GREEN,
    NamedStyle::new("yellow", 33, 39),
    NamedStyle::new("blue", 34, 39),
    NamedStyle::new("magenta", 35, 39),
    NamedStyle::new("cyan", 36, 39),
    NamedStyle::new("white", 37, 39),
    NamedStyle::new("gray", 90, 39),
    NamedStyle::new("grey", 90, 39),
    NamedStyle::new("blackBright", 90, 39),
    NamedStyle::new("redBright", 91, 39),
    NamedStyle::new("greenBright", 92, 39),
    NamedStyle::new("yellowBright", 93, 39),
    NamedStyle::new("blueBright", 94, 39),
    NamedStyle::new("magentaBright", 95, 39),
    NamedStyle::new("cyanBright", 96, 39),
    NamedStyle::new("whiteBright", 97, 39),
    // Background
    NamedStyle::new("bgBlack", 40, 49),
    NamedStyle::new("bgRed", 41, 49),
    NamedStyle::new("bgGreen", 42, 49),
    NamedStyle::new("bgYellow", 43, 49),
    NamedStyle::new("bgBlue", 44, 49),
    NamedStyle::new("bgMagenta", 45, 49),
    NamedStyle::new("bgCyan", 46, 49),
    NamedStyle::new("bgWhite", 47, 49),
    NamedStyle::new("bgBlackBright", 100, 49),
    NamedStyle::new("bgRedBright", 101, 49),
    NamedStyle::new("bgGreenBright", 102, 49),
    NamedStyle::new("bgYellowBright", 103, 49),
    NamedStyle::new("bgBlueBright", 104, 49),
    NamedStyle::new("bgMagentaBright", 105, 49),
    NamedStyle::new("bgCyanBright", 106, 49),
    NamedStyle::new("bgWhiteBright", 107, 49),
];

/// Looks up a palette style by its exact (case-sensitive) name.
pub fn lookup(name: &str) -> Option<NamedStyle> {
    STYLES.iter().copied().find(|style| style.name == name)
}

/// Returns true if `name` belongs to the palette and cannot be redefined.
pub fn is_reserved(name: &str) -> bool {
    lookup(name).is_some()
}

/// Applies a pipeline of named styles to `text`.
///
/// The first style ends up outermost and the last innermost, the same order
/// a chained `bold.blue(text)` call produces.
pub fn apply_all(styles: &[NamedStyle], text: &str) -> String {
    styles
        .iter()
        .rev()
        .fold(text.to_string(), |acc, style| style.apply(&acc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_and_unknown() {
        assert_eq!(lookup("bold"), Some(BOLD));
        assert_eq!(lookup("bgGreen").map(|s| s.name()), Some("bgGreen"));
        assert!(lookup("Bold").is_none());
        assert!(lookup("purple").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_reserved_names() {
        assert!(is_reserved("red"));
        assert!(is_reserved("underline"));
        assert!(!is_reserved("bracket"));
    }

    #[test]
    fn test_apply_single() {
        assert_eq!(BOLD.apply("x"), "\x1b[1mx\x1b[22m");
        assert_eq!(lookup("bgRed").unwrap().apply("x"), "\x1b[41mx\x1b[49m");
    }

    #[test]
    fn test_apply_all_first_is_outermost() {
        let blue = lookup("blue").unwrap();
        assert_eq!(
            apply_all(&[BOLD, blue], "["),
            "\x1b[1m\x1b[34m[\x1b[39m\x1b[22m"
        );
    }

    #[test]
    fn test_apply_all_empty_is_identity() {
        assert_eq!(apply_all(&[], "plain"), "plain");
    }

    #[test]
    fn test_shared_close_code_becomes_outer_open() {
        let dim = lookup("dim").unwrap();
        let out = BOLD.apply(&dim.apply("x"));
        assert_eq!(out, "\x1b[1m\x1b[2mx\x1b[1m\x1b[22m");
    }
}
