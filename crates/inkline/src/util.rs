//! Escape stripping, width measurement and terminal width detection.

use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::UnicodeWidthStr;

/// Width used when the terminal size cannot be determined.
pub const FALLBACK_COLUMNS: usize = 80;

static COLOR_CODES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[(?:[0-9]{1,3}(?:;[0-9]{1,3})*)?[mK]").expect("valid color code pattern")
});

type WidthDetector = fn() -> usize;

static WIDTH_DETECTOR: Lazy<Mutex<WidthDetector>> =
    Lazy::new(|| Mutex::new(default_width_detector));

/// Removes color (SGR) and erase-line sequences, keeping cursor movement.
///
/// ```rust
/// use inkline::strip_colors;
///
/// assert_eq!(strip_colors("\x1b[31mred\x1b[39m\x1b[1A"), "red\x1b[1A");
/// ```
pub fn strip_colors(s: &str) -> String {
    COLOR_CODES.replace_all(s, "").into_owned()
}

/// Removes every ANSI escape sequence.
///
/// ```rust
/// use inkline::strip_ansi;
///
/// assert_eq!(strip_ansi("\x1b[31mred\x1b[39m\x1b[1A"), "red");
/// ```
pub fn strip_ansi(s: &str) -> String {
    console::strip_ansi_codes(s).into_owned()
}

/// Display width of `s` once escape sequences are removed.
pub fn visible_width(s: &str) -> usize {
    console::strip_ansi_codes(s).width()
}

/// Overrides the function used to determine the terminal width.
///
/// Useful in tests, where stdout is rarely a terminal:
///
/// ```rust
/// inkline::set_width_detector(|| 80);
/// assert_eq!(inkline::terminal_width(), 80);
/// ```
pub fn set_width_detector(detector: WidthDetector) {
    let mut guard = WIDTH_DETECTOR.lock().unwrap_or_else(PoisonError::into_inner);
    *guard = detector;
}

/// Restores the default terminal width detector.
pub fn reset_width_detector() {
    set_width_detector(default_width_detector);
}

/// Returns the terminal width in columns, using the configured detector.
pub fn terminal_width() -> usize {
    let detector = WIDTH_DETECTOR.lock().unwrap_or_else(PoisonError::into_inner);
    (*detector)()
}

fn default_width_detector() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(FALLBACK_COLUMNS)
}
