//! Public select and transform operations.
//!
//! The plain forms compile their path on every call. Hold on to a
//! `CompiledPath` and use the `compiled_*` forms (or its methods) when the
//! same path runs repeatedly.

use super::compiler::{compile, CompiledPath};
use super::error::Result;
use super::step::Step;
use crate::document::node::{Focus, Value};

/// Collects every focus `path` reaches in `structure`, in traversal order.
pub fn select<I, S>(path: I, structure: &Value) -> Result<Vec<Value>>
where
    I: IntoIterator<Item = S>,
    S: Into<Step>,
{
    compile(path).select(structure)
}

/// Returns the single focus `path` reaches, or `None`.
///
/// More than one focus is `NavError::MultipleFocuses`; compile with a
/// `Config` to pick the first or last focus instead.
pub fn select_one<I, S>(path: I, structure: &Value) -> Result<Option<Value>>
where
    I: IntoIterator<Item = S>,
    S: Into<Step>,
{
    compile(path).select_one(structure)
}

/// Rebuilds `structure` with every focus replaced by `update(focus)`.
///
/// # Example
///
/// ```
/// use navpath::path::{transform, ALL};
/// use navpath::document::{from_yaml_str, Focus, Value};
///
/// let data = from_yaml_str("[1, 2, 3]").unwrap();
/// let odd = transform(
///     [ALL],
///     |focus| match focus {
///         Focus::Value(Value::Integer(n)) if n % 2 == 0 => Focus::Absent,
///         other => other,
///     },
///     data,
/// )
/// .unwrap();
/// assert_eq!(odd, from_yaml_str("[1, 3]").unwrap());
/// ```
pub fn transform<I, S, F>(path: I, update: F, structure: Value) -> Result<Value>
where
    I: IntoIterator<Item = S>,
    S: Into<Step>,
    F: FnMut(Focus) -> Focus,
{
    compile(path).transform(update, structure)
}

/// Replaces every focus `path` reaches with `value`.
pub fn setval<I, S>(path: I, value: impl Into<Focus>, structure: Value) -> Result<Value>
where
    I: IntoIterator<Item = S>,
    S: Into<Step>,
{
    compile(path).setval(value, structure)
}

pub fn compiled_select(path: &CompiledPath, structure: &Value) -> Result<Vec<Value>> {
    path.select(structure)
}

pub fn compiled_select_one(path: &CompiledPath, structure: &Value) -> Result<Option<Value>> {
    path.select_one(structure)
}

pub fn compiled_transform<F>(path: &CompiledPath, update: F, structure: Value) -> Result<Value>
where
    F: FnMut(Focus) -> Focus,
{
    path.transform(update, structure)
}

pub fn compiled_setval(
    path: &CompiledPath,
    value: impl Into<Focus>,
    structure: Value,
) -> Result<Value> {
    path.setval(value, structure)
}
