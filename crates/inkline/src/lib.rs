//! # inkline - ANSI-styled strings from inline directives
//!
//! `inkline` expands templates with embedded styling directives into strings
//! carrying terminal escape sequences.
//!
//! ## Directives
//!
//! | directive | output |
//! |-----------|--------|
//! | `{{#C bold red}}text{{/C}}` | `text` in bold red |
//! | `{{#C i#196 X#050}}text{{/C}}` | 8-bit colors, by index or by RGB cube digits |
//! | `{{#C h#FF8800}}text{{/C}}` | 24-bit color |
//! | `{{B warn}}` | banner: `[ WARN]` in the `warn` style |
//! | `{{E ok}}` | footer: `[ OK ]` right-aligned on the previous line |
//! | `{{BW}}`, `{{EO}}` | shortcuts for `{{B warn}}`, `{{E ok}}` |
//! | `{{name}}` | context lookup |
//!
//! Lowercase color prefixes (`i#`, `x#`, `h#`) set the foreground, uppercase
//! ones the background. Style lists may be separated by any character other
//! than letters, digits, `#`, `_` and `-`: `bold.red` is `bold red`.
//!
//! ## Custom styles
//!
//! A custom style is an alias for a style list. The defaults include
//! `highlight`, `bracket`, `info`, `ok`, `warn`, `error`, `debug`, `skip` and
//! their `light_` variants. Aliases cannot shadow terminal style names and
//! cannot reference other aliases.
//!
//! ```rust
//! use inkline::Inkline;
//!
//! let mut ink = Inkline::new();
//! ink.set_columns(Some(80));
//! ink.define_style("title", "bold underline").unwrap();
//!
//! let out = ink.format("{{#C title}}Report{{/C}}", &()).unwrap();
//! assert_eq!(out, "\x1b[1m\x1b[4mReport\x1b[24m\x1b[22m");
//!
//! assert!(ink.define_style("red", "blue").is_err());
//! ```
//!
//! ## Stripping
//!
//! [`Inkline::format_no_color`] removes colors but keeps cursor movement, so
//! footers stay aligned. [`Inkline::plain_format`] removes every escape.
//!
//! ```rust
//! let mut ink = inkline::Inkline::new();
//! ink.set_columns(Some(80));
//!
//! let out = ink.format_no_color("{{B warn}} Message {{E skip}}", &()).unwrap();
//! assert_eq!(out, "[ WARN] Message \n\x1b[1A\x1b[74C[SKIP]");
//!
//! let out = ink.plain_format("{{B warn}} Message {{E skip}}", &()).unwrap();
//! assert_eq!(out, "[ WARN] Message \n[SKIP]");
//! ```
//!
//! ## Errors
//!
//! A formatter is silent by default: a template that fails to expand comes
//! back unchanged. Style definition errors are always returned.

pub mod compose;
pub mod config;
mod error;
mod formatter;
pub mod global;
pub mod style;
pub mod template;
mod util;

pub use compose::apply_styles;
pub use config::Config;
pub use error::FormatError;
pub use formatter::Inkline;
pub use style::{StyleError, StyleRegistry, StyleRequest};
pub use template::DirectiveError;
pub use util::{
    reset_width_detector, set_width_detector, strip_ansi, strip_colors, terminal_width,
    visible_width, FALLBACK_COLUMNS,
};
