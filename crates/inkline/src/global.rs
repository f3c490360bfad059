//! Process-wide default formatter.
//!
//! The free functions here forward to a lazily created [`Inkline`] guarded by
//! a read-write lock. Formatting takes the read lock; [`configure`] and the
//! style setters take the write lock.
//!
//! ```rust
//! inkline::global::configure(|ink| ink.set_columns(Some(80)));
//! let out = inkline::global::plain_format("{{E ok}}", &()).unwrap();
//! assert_eq!(out, "\n[ OK ]");
//! # inkline::global::reset();
//! ```

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::FormatError;
use crate::formatter::Inkline;
use crate::style::{StyleError, StyleRequest};

static DEFAULT: Lazy<RwLock<Inkline>> = Lazy::new(|| RwLock::new(Inkline::new()));

fn read() -> RwLockReadGuard<'static, Inkline> {
    DEFAULT.read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, Inkline> {
    DEFAULT.write().unwrap_or_else(PoisonError::into_inner)
}

/// Formats with the default formatter. See [`Inkline::format`].
pub fn format<S>(template: &str, context: &S) -> Result<String, FormatError>
where
    S: Serialize + ?Sized,
{
    read().format(template, context)
}

pub fn format_parts<I, P, S>(parts: I, context: &S) -> Result<String, FormatError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<str>,
    S: Serialize + ?Sized,
{
    read().format_parts(parts, context)
}

pub fn format_no_color<S>(template: &str, context: &S) -> Result<String, FormatError>
where
    S: Serialize + ?Sized,
{
    read().format_no_color(template, context)
}

pub fn plain_format<S>(template: &str, context: &S) -> Result<String, FormatError>
where
    S: Serialize + ?Sized,
{
    read().plain_format(template, context)
}

pub fn log<S>(template: &str, context: &S) -> Result<(), FormatError>
where
    S: Serialize + ?Sized,
{
    read().log(template, context)
}

pub fn error<S>(template: &str, context: &S) -> Result<(), FormatError>
where
    S: Serialize + ?Sized,
{
    read().error(template, context)
}

/// Returns the value of a custom style of the default formatter.
pub fn style(name: &str) -> Option<String> {
    read().style(name).map(str::to_string)
}

pub fn define_style(name: &str, value: &str) -> Result<Option<String>, StyleError> {
    write().define_style(name, value)
}

pub fn remove_style(name: &str) -> Option<String> {
    write().remove_style(name)
}

/// Queries, removes or defines a style. See [`StyleRegistry::manage`](crate::style::StyleRegistry::manage).
pub fn manage_style(
    name: &str,
    request: impl Into<StyleRequest>,
) -> Result<Option<String>, StyleError> {
    match request.into() {
        StyleRequest::Query => Ok(style(name)),
        request => write().manage_style(name, request),
    }
}

/// Runs `f` with exclusive access to the default formatter.
///
/// The lock is held while `f` runs and is not reentrant: calling any other
/// function of this module from inside `f` deadlocks. Use the `&mut Inkline`
/// argument instead.
pub fn configure<F, R>(f: F) -> R
where
    F: FnOnce(&mut Inkline) -> R,
{
    f(&mut write())
}

/// Restores the default formatter to its initial state.
pub fn reset() {
    *write() = Inkline::new();
}
