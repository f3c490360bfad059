//! MiniJinja environment with the styling helpers installed.
//!
//! A [`Composer`] holds everything a render needs: the custom style registry,
//! the bracket templates, the shortcut table and the footer width. Rendering
//! lowers the template with [`translate`](super::translate), builds an
//! environment whose helpers share the composer through an `Arc`, and expands
//! the result.
//!
//! Installed helpers:
//!
//! - `C`: filter block styling its body, `{% filter C("bold red") %}`
//! - `B`, `E`: banner and footer functions
//! - `B<code>`, `E<code>`: one pair per shortcut, e.g. `BW()` for `B("warn")`

use std::cell::Cell;
use std::collections::BTreeMap;
use std::sync::Arc;

use minijinja::value::{Rest, ValueKind};
use minijinja::{context, Environment, Error, ErrorKind, State, UndefinedBehavior, Value};
use serde::Serialize;

use super::directive::translate;
use super::status::{banner, footer, StatusContext};
use crate::compose::apply_styles;
use crate::error::FormatError;
use crate::style::StyleRegistry;
use crate::util::terminal_width;

/// Default opening bracket template.
pub const DEFAULT_OPENING_BRACKET: &str = "{{#C bracket}}[{{/C}}";

/// Default closing bracket template.
pub const DEFAULT_CLOSING_BRACKET: &str = "{{#C bracket}}]{{/C}}";

/// Default shortcut table: code → status name.
pub const DEFAULT_SHORTCUTS: &[(&str, &str)] = &[
    ("I", "info"),
    ("W", "warn"),
    ("O", "ok"),
    ("F", "fail"),
    ("E", "error"),
    ("P", "pass"),
    ("S", "skip"),
    ("D", "debug"),
];

/// Bracket expansions that may be in progress on one thread at once.
const MAX_BRACKET_DEPTH: usize = 1;

thread_local! {
    static BRACKET_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Marks a bracket expansion in progress on the current thread.
///
/// A bracket template that calls `B` or `E` would otherwise expand itself
/// without end.
struct BracketGuard;

impl BracketGuard {
    fn enter() -> Result<Self, Error> {
        BRACKET_DEPTH.with(|depth| {
            if depth.get() >= MAX_BRACKET_DEPTH {
                return Err(Error::new(
                    ErrorKind::InvalidOperation,
                    "bracket template recursion",
                ));
            }
            depth.set(depth.get() + 1);
            Ok(BracketGuard)
        })
    }
}

impl Drop for BracketGuard {
    fn drop(&mut self) {
        BRACKET_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Rendering state shared by the helpers of one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composer {
    styles: StyleRegistry,
    opening_bracket: String,
    closing_bracket: String,
    shortcuts: BTreeMap<String, String>,
    columns: Option<usize>,
}

impl Default for Composer {
    fn default() -> Self {
        Self {
            styles: StyleRegistry::with_defaults(),
            opening_bracket: DEFAULT_OPENING_BRACKET.to_string(),
            closing_bracket: DEFAULT_CLOSING_BRACKET.to_string(),
            shortcuts: DEFAULT_SHORTCUTS
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
            columns: None,
        }
    }
}

impl Composer {
    /// Creates a composer with the default styles, brackets and shortcuts.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleRegistry {
        &mut self.styles
    }

    pub fn opening_bracket(&self) -> &str {
        &self.opening_bracket
    }

    pub fn closing_bracket(&self) -> &str {
        &self.closing_bracket
    }

    /// Replaces the bracket templates. They are only checked when expanded.
    pub fn set_brackets(&mut self, opening: impl Into<String>, closing: impl Into<String>) {
        self.opening_bracket = opening.into();
        self.closing_bracket = closing.into();
    }

    pub fn shortcuts(&self) -> &BTreeMap<String, String> {
        &self.shortcuts
    }

    /// Maps `code` to a status name, installing `B<code>` and `E<code>`.
    pub fn set_shortcut(&mut self, code: impl Into<String>, name: impl Into<String>) {
        self.shortcuts.insert(code.into(), name.into());
    }

    /// Removes a shortcut, returning the status name it mapped to.
    pub fn remove_shortcut(&mut self, code: &str) -> Option<String> {
        self.shortcuts.remove(code)
    }

    /// Fixes the footer width. `None` asks the terminal each time.
    pub fn set_columns(&mut self, columns: Option<usize>) {
        self.columns = columns;
    }

    /// Footer width in effect.
    pub fn columns(&self) -> usize {
        self.columns.unwrap_or_else(terminal_width)
    }

    /// Styles `content` with a raw style string, expanding custom styles.
    pub fn paint(&self, styles: &str, content: &str) -> String {
        apply_styles(self.styles.parse_styles(styles).split_whitespace(), content)
    }

    /// Returns true if `name` is rendered as a helper call.
    pub fn is_helper(&self, name: &str) -> bool {
        match name {
            "B" | "E" => true,
            _ => name
                .strip_prefix('B')
                .or_else(|| name.strip_prefix('E'))
                .map_or(false, |code| self.shortcuts.contains_key(code)),
        }
    }

    /// Lowers and expands `source` in `env`, without a context.
    fn expand(&self, env: &Environment<'_>, source: &str) -> Result<String, Error> {
        let lowered = translate(source, |name| self.is_helper(name))
            .map_err(|err| Error::new(ErrorKind::SyntaxError, err.to_string()))?;
        env.render_str(&lowered, context! {})
    }

    /// Builds an environment whose helpers render with this composer.
    pub fn environment(self: Arc<Self>) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Chainable);
        env.set_keep_trailing_newline(true);
        env.set_formatter(|out, state, value| {
            if value.is_none() {
                Ok(())
            } else {
                minijinja::escape_formatter(out, state, value)
            }
        });

        let composer = Arc::clone(&self);
        env.add_filter("C", move |body: Value, args: Rest<Value>| -> String {
            composer.paint(&join_arguments(&args), &argument_text(&body))
        });

        let composer = Arc::clone(&self);
        env.add_function(
            "B",
            move |state: &State, args: Rest<Value>| -> Result<String, Error> {
                banner(&composer.in_state(state), &argument_texts(&args))
            },
        );

        let composer = Arc::clone(&self);
        env.add_function(
            "E",
            move |state: &State, args: Rest<Value>| -> Result<String, Error> {
                footer(&composer.in_state(state), &argument_texts(&args))
            },
        );

        for (code, name) in &self.shortcuts {
            let composer = Arc::clone(&self);
            let status = name.clone();
            env.add_function(
                format!("B{}", code),
                move |state: &State, _args: Rest<Value>| -> Result<String, Error> {
                    banner(&composer.in_state(state), &[status.as_str()])
                },
            );

            let composer = Arc::clone(&self);
            let status = name.clone();
            env.add_function(
                format!("E{}", code),
                move |state: &State, _args: Rest<Value>| -> Result<String, Error> {
                    footer(&composer.in_state(state), &[status.as_str()])
                },
            );
        }

        env
    }

    /// Expands `template` with `context`.
    ///
    /// A context that does not serialize to a map is replaced by an empty one.
    pub fn render<S>(self: Arc<Self>, template: &str, context: &S) -> Result<String, FormatError>
    where
        S: Serialize + ?Sized,
    {
        let lowered = translate(template, |name| self.is_helper(name))?;
        let env = self.environment();

        let ctx = Value::from_serialize(context);
        let ctx = if ctx.kind() == ValueKind::Map {
            ctx
        } else {
            context! {}
        };

        Ok(env.render_str(&lowered, ctx)?)
    }

    fn in_state<'a, 's, 'env>(&'a self, state: &'a State<'s, 'env>) -> InState<'a, 's, 'env> {
        InState {
            composer: self,
            state,
        }
    }
}

/// A composer seen from inside a running render.
struct InState<'a, 's, 'env> {
    composer: &'a Composer,
    state: &'a State<'s, 'env>,
}

impl StatusContext for InState<'_, '_, '_> {
    type Error = Error;

    fn paint(&self, styles: &str, content: &str) -> String {
        self.composer.paint(styles, content)
    }

    fn brackets(&self) -> Result<(String, String), Error> {
        let _guard = BracketGuard::enter()?;
        let env = self.state.env();
        Ok((
            self.composer.expand(env, &self.composer.opening_bracket)?,
            self.composer.expand(env, &self.composer.closing_bracket)?,
        ))
    }

    fn columns(&self) -> usize {
        self.composer.columns()
    }
}

/// Text of a helper argument. Undefined and none render as empty strings.
fn argument_text(value: &Value) -> String {
    if value.is_undefined() || value.is_none() {
        String::new()
    } else if let Some(s) = value.as_str() {
        s.to_string()
    } else {
        value.to_string()
    }
}

fn argument_texts(args: &[Value]) -> Vec<String> {
    args.iter().map(argument_text).collect()
}

fn join_arguments(args: &[Value]) -> String {
    argument_texts(args).join(" ")
}
