//! Formatter configuration.
//!
//! Every field is optional. Styles and shortcuts are overlays: they are applied
//! on top of the built-in tables, and a `~` value removes a built-in entry.
//!
//! ```yaml
//! silent: false
//! opening_bracket: "{{#C light_bracket}}<{{/C}}"
//! closing_bracket: "{{#C light_bracket}}>{{/C}}"
//! columns: 100
//! styles:
//!   note: cyan italic
//!   debug: ~
//! shortcuts:
//!   N: note
//!   D: ~
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::FormatError;
use crate::template::{DEFAULT_CLOSING_BRACKET, DEFAULT_OPENING_BRACKET};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Return the raw input instead of failing when expansion fails.
    pub silent: bool,

    #[serde(alias = "openingBracket")]
    pub opening_bracket: String,

    #[serde(alias = "closingBracket")]
    pub closing_bracket: String,

    /// Custom style overlay. Values go through the same checks as
    /// [`StyleRegistry::manage`](crate::style::StyleRegistry::manage).
    pub styles: serde_yaml::Mapping,

    /// Shortcut overlay, code → status name. `~` removes a code.
    pub shortcuts: BTreeMap<String, Option<String>>,

    /// Fixed footer width. When absent the terminal is asked.
    pub columns: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            silent: true,
            opening_bracket: DEFAULT_OPENING_BRACKET.to_string(),
            closing_bracket: DEFAULT_CLOSING_BRACKET.to_string(),
            styles: serde_yaml::Mapping::new(),
            shortcuts: BTreeMap::new(),
            columns: None,
        }
    }
}

impl Config {
    /// Parses a configuration from YAML.
    ///
    /// An empty document yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Config`] if the YAML is malformed or a field
    /// has the wrong type.
    pub fn from_yaml(yaml: &str) -> Result<Self, FormatError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a YAML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FormatError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
