//! Custom style registry.
//!
//! A custom style is a named alias for a list of style tokens, for example
//! `warn` → `bold yellow`. Templates may mix custom names with palette names
//! and encoded colors; [`StyleRegistry::parse_styles`] expands the custom
//! ones before composition.
//!
//! Two rules keep the table flat and unambiguous:
//!
//! - a custom name can never shadow a palette name ([`StyleError::ReservedName`])
//! - a custom value can never reference another custom style
//!   ([`StyleError::Nesting`]), so expansion is exactly one level deep
//!
//! Both are checked when a style is defined. A rejected definition leaves the
//! registry untouched.
//!
//! # Example
//!
//! ```rust
//! use inkline::style::StyleRegistry;
//!
//! let mut styles = StyleRegistry::with_defaults();
//! assert_eq!(styles.get("bracket"), Some("bold blue"));
//!
//! styles.define("title", "bold.underline").unwrap();
//! assert_eq!(styles.get("title"), Some("bold underline"));
//!
//! assert_eq!(styles.parse_styles("title red"), "bold underline red");
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::error::StyleError;
use super::palette;

static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9#_-]").expect("valid separator pattern"));
static TOKENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("valid token pattern"));

/// Styles installed in every registry built by [`StyleRegistry::with_defaults`].
pub const DEFAULT_STYLES: &[(&str, &str)] = &[
    ("highlight", "bold x#045"),
    ("bracket", "bold blue"),
    ("info", "bold white"),
    ("ok", "bold green"),
    ("success", "bold green"),
    ("warn", "bold yellow"),
    ("fatal", "bold red"),
    ("fail", "bold red"),
    ("error", "bold red"),
    ("pass", "bold magenta"),
    ("debug", "bold x#303"),
    ("skip", "bold gray"),
    // Same hues without bold
    ("light_highlight", "x#045"),
    ("light_bracket", "x#013"),
    ("light_info", "white"),
    ("light_ok", "green"),
    ("light_success", "green"),
    ("light_warn", "yellow"),
    ("light_fatal", "red"),
    ("light_fail", "red"),
    ("light_error", "red"),
    ("light_pass", "magenta"),
    ("light_debug", "x#303"),
    ("light_skip", "gray"),
];

/// Replaces every character outside `[a-zA-Z0-9#_-]` with a space.
///
/// This lets `bold.red`, `bold/red` and `bold red` all mean the same thing.
pub fn sanitize(raw: &str) -> String {
    SEPARATORS.replace_all(raw, " ").into_owned()
}

/// The argument of the three-way [`StyleRegistry::manage`] contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleRequest {
    /// Read the current value.
    Query,
    /// Remove the entry, returning the previous value.
    Remove,
    /// Validate and store a value.
    Define(String),
    /// A value of an unsupported kind (number, list, map, `true`).
    Unsupported,
}

impl From<&str> for StyleRequest {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            StyleRequest::Remove
        } else {
            StyleRequest::Define(value.to_string())
        }
    }
}

impl From<String> for StyleRequest {
    fn from(value: String) -> Self {
        StyleRequest::from(value.as_str())
    }
}

impl From<&serde_yaml::Value> for StyleRequest {
    /// Falsy values (`null`, `false`, `0`, `""`) request removal.
    fn from(value: &serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null | Value::Bool(false) => StyleRequest::Remove,
            Value::Number(n) if n.as_f64().map_or(false, |f| f == 0.0 || f.is_nan()) => {
                StyleRequest::Remove
            }
            Value::String(s) => StyleRequest::from(s.as_str()),
            _ => StyleRequest::Unsupported,
        }
    }
}

impl From<serde_yaml::Value> for StyleRequest {
    fn from(value: serde_yaml::Value) -> Self {
        StyleRequest::from(&value)
    }
}

impl<T: Into<StyleRequest>> From<Option<T>> for StyleRequest {
    fn from(value: Option<T>) -> Self {
        value.map_or(StyleRequest::Query, Into::into)
    }
}

/// Named custom styles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRegistry {
    styles: HashMap<String, String>,
}

impl StyleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding [`DEFAULT_STYLES`].
    pub fn with_defaults() -> Self {
        let styles = DEFAULT_STYLES
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        Self { styles }
    }

    /// Returns the value of a custom style.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.styles.get(name).map(String::as_str)
    }

    /// Returns true if a custom style with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Number of custom styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Returns true if no custom styles are defined.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// All custom style names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.styles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Defines or redefines a custom style and returns the stored value.
    ///
    /// The stored value is the sanitized form of `value`. A value with no
    /// tokens removes the entry instead and returns its previous value.
    ///
    /// # Errors
    ///
    /// - [`StyleError::ReservedName`] if `name` is a palette style
    /// - [`StyleError::Nesting`] if `value` mentions another custom style
    pub fn define(&mut self, name: &str, value: &str) -> Result<Option<String>, StyleError> {
        let value = sanitize(value);
        if value.trim().is_empty() {
            return Ok(self.remove(name));
        }

        if palette::is_reserved(name) {
            return Err(StyleError::ReservedName {
                name: name.to_string(),
            });
        }

        if let Some(token) = value.split_whitespace().find(|token| self.expand(token).is_some()) {
            return Err(StyleError::Nesting {
                name: name.to_string(),
                token: token.to_string(),
            });
        }

        tracing::debug!(style = name, value = %value, "defining custom style");
        self.styles.insert(name.to_string(), value.clone());
        Ok(Some(value))
    }

    /// Removes a custom style, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let previous = self.styles.remove(name);
        if previous.is_some() {
            tracing::debug!(style = name, "removed custom style");
        }
        previous
    }

    /// Queries, removes or defines a style depending on `request`.
    ///
    /// | request | effect | returns |
    /// |---------|--------|---------|
    /// | `None` / [`StyleRequest::Query`] | none | current value |
    /// | `""`, `null`, `false`, `0` | removes the entry | previous value |
    /// | non-empty string | validates and stores | stored value |
    /// | any other value | none | [`StyleError::TypeKind`] |
    ///
    /// ```rust
    /// use inkline::style::{StyleRegistry, StyleRequest};
    ///
    /// let mut styles = StyleRegistry::new();
    /// styles.manage("note", "cyan").unwrap();
    /// assert_eq!(styles.manage("note", StyleRequest::Query).unwrap().as_deref(), Some("cyan"));
    /// assert_eq!(styles.manage("note", "").unwrap().as_deref(), Some("cyan"));
    /// assert_eq!(styles.manage("note", None::<&str>).unwrap(), None);
    /// ```
    pub fn manage(
        &mut self,
        name: &str,
        request: impl Into<StyleRequest>,
    ) -> Result<Option<String>, StyleError> {
        match request.into() {
            StyleRequest::Query => Ok(self.get(name).map(str::to_string)),
            StyleRequest::Remove => Ok(self.remove(name)),
            StyleRequest::Define(value) => self.define(name, &value),
            StyleRequest::Unsupported => Err(StyleError::TypeKind {
                name: name.to_string(),
            }),
        }
    }

    /// Returns the expansion of `token` if it names a non-empty custom style.
    pub fn expand(&self, token: &str) -> Option<&str> {
        self.get(token).filter(|value| !value.is_empty())
    }

    /// Sanitizes `raw` and replaces custom style names with their values.
    ///
    /// Tokens that are not custom styles are kept as they are, so palette
    /// names and encoded colors pass through untouched.
    pub fn parse_styles(&self, raw: &str) -> String {
        let sanitized = sanitize(raw);
        TOKENS
            .replace_all(&sanitized, |caps: &Captures| {
                let token = &caps[0];
                self.expand(token).unwrap_or(token).to_string()
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("bgGreen.underline@bold"), "bgGreen underline bold");
        assert_eq!(sanitize("x#045 light_ok h-1"), "x#045 light_ok h-1");
        assert_eq!(sanitize("a$b/c"), "a b c");
    }

    #[test]
    fn test_defaults() {
        let styles = StyleRegistry::with_defaults();
        assert_eq!(styles.len(), DEFAULT_STYLES.len());
        assert_eq!(styles.get("bracket"), Some("bold blue"));
        assert_eq!(styles.get("debug"), Some("bold x#303"));
        assert_eq!(styles.get("light_bracket"), Some("x#013"));
        assert_eq!(styles.get("nope"), None);
    }

    #[test]
    fn test_redefine_keeps_latest() {
        let mut styles = StyleRegistry::new();
        styles.define("new-style-1", "red").unwrap();
        assert_eq!(styles.get("new-style-1"), Some("red"));
        styles.define("new-style-1", "green").unwrap();
        assert_eq!(styles.get("new-style-1"), Some("green"));
    }

    #[test]
    fn test_define_stores_sanitized_value() {
        let mut styles = StyleRegistry::new();
        assert_eq!(styles.define("s", "bold.red").unwrap().as_deref(), Some("bold red"));
        assert_eq!(styles.get("s"), Some("bold red"));
    }

    #[test]
    fn test_define_empty_value_removes() {
        let mut styles = StyleRegistry::new();
        styles.define("note", "cyan").unwrap();
        assert_eq!(styles.define("note", "").unwrap().as_deref(), Some("cyan"));
        assert_eq!(styles.get("note"), None);
        assert_eq!(styles.define("note", "..").unwrap(), None);
        assert!(!styles.contains("note"));
    }

    #[test]
    fn test_reserved_name_rejected() {
        let mut styles = StyleRegistry::with_defaults();
        let before = styles.clone();
        let err = styles.define("red", "yellow").unwrap_err();
        assert_eq!(
            err,
            StyleError::ReservedName {
                name: "red".to_string()
            }
        );
        assert_eq!(styles, before);
    }

    #[test]
    fn test_nesting_rejected() {
        let mut styles = StyleRegistry::with_defaults();
        let before = styles.clone();
        let err = styles.define("new-style-2", "bold bracket").unwrap_err();
        assert_eq!(
            err,
            StyleError::Nesting {
                name: "new-style-2".to_string(),
                token: "bracket".to_string()
            }
        );
        assert_eq!(styles, before);
    }

    #[test]
    fn test_redefining_with_own_name_is_nesting() {
        let mut styles = StyleRegistry::with_defaults();
        assert!(matches!(
            styles.define("ok", "ok green"),
            Err(StyleError::Nesting { .. })
        ));
    }

    #[test]
    fn test_manage_query_remove_define() {
        let mut styles = StyleRegistry::new();
        assert_eq!(styles.manage("a", StyleRequest::Query).unwrap(), None);
        assert_eq!(styles.manage("a", "red").unwrap().as_deref(), Some("red"));
        assert_eq!(styles.manage("a", None::<&str>).unwrap().as_deref(), Some("red"));
        assert_eq!(styles.manage("a", StyleRequest::Remove).unwrap().as_deref(), Some("red"));
        assert_eq!(styles.manage("a", StyleRequest::Query).unwrap(), None);
        assert_eq!(styles.manage("a", StyleRequest::Remove).unwrap(), None);
    }

    #[test]
    fn test_manage_falsy_yaml_values_remove() {
        use serde_yaml::Value;

        let mut styles = StyleRegistry::new();
        let sentinels: Vec<Value> = serde_yaml::from_str("[~, false, 0, '']").unwrap();
        for (i, sentinel) in sentinels.iter().enumerate() {
            let name = format!("s{}", i);
            styles.define(&name, "blue").unwrap();
            assert_eq!(styles.manage(&name, sentinel).unwrap().as_deref(), Some("blue"));
            assert!(!styles.contains(&name));
        }
    }

    #[test]
    fn test_manage_unsupported_kinds() {
        use serde_yaml::Value;

        let mut styles = StyleRegistry::new();
        let values: Vec<Value> = serde_yaml::from_str("[true, 3, {a: 1}, []]").unwrap();
        for value in &values {
            assert_eq!(
                styles.manage("x", value),
                Err(StyleError::TypeKind {
                    name: "x".to_string()
                })
            );
        }
        assert!(styles.is_empty());
    }

    #[test]
    fn test_parse_styles_mixes_custom_and_literal() {
        let mut styles = StyleRegistry::new();
        styles.define("custom-alias", "bold blue").unwrap();
        assert_eq!(
            styles.parse_styles("custom-alias literal-style"),
            "bold blue literal-style"
        );
    }

    #[test]
    fn test_parse_styles_expands_one_level() {
        let styles = StyleRegistry::with_defaults();
        assert_eq!(styles.parse_styles("bracket.i#001"), "bold blue i#001");
        assert_eq!(styles.parse_styles("bracket-2"), "bracket-2");
    }

    #[test]
    fn test_names_sorted() {
        let mut styles = StyleRegistry::new();
        styles.define("b", "red").unwrap();
        styles.define("a", "red").unwrap();
        assert_eq!(styles.names(), vec!["a", "b"]);
    }
}
