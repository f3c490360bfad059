//! Template expansion.
//!
//! - [`translate`]: lowers the directive grammar to MiniJinja
//! - [`banner`], [`footer`]: the bracketed status tags
//! - [`Composer`]: builds environments with the helpers installed

mod directive;
mod engine;
mod status;

pub use directive::{translate, DirectiveError};
pub use engine::{
    Composer, DEFAULT_CLOSING_BRACKET, DEFAULT_OPENING_BRACKET, DEFAULT_SHORTCUTS,
};
pub use status::{banner, footer, split_arguments, StatusContext, BANNER_WIDTH};
