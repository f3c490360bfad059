//! Style primitives.
//!
//! - [`palette`]: the reserved named terminal styles with their SGR codes
//! - [`color`]: encoded colors (`i#NNN`, `x#RGB`, `h#RRGGBB`)
//! - [`token`]: classification of a single style token
//! - [`StyleRegistry`]: custom style aliases with shadow and nesting checks

pub mod color;
mod error;
pub mod palette;
mod registry;
pub mod token;

pub use error::StyleError;
pub use registry::{sanitize, StyleRegistry, StyleRequest, DEFAULT_STYLES};
pub use token::StyleToken;
