//! The structural filter navigator.
//!
//! `filterer(path)` narrows a sequence to the elements in which `path`
//! selects at least one defined focus. The continuation sees that
//! subsequence as a single sequence. On transform, the result is realigned
//! with the original sequence: element `i` that matched as the `j`-th
//! filtered element takes slot `j` of the continuation's output, and is
//! dropped when that slot no longer exists.

use super::compiler::CompiledPath;
use super::error::{NavError, Result};
use super::navigator::{SelectFn, TransformFn};
use crate::document::node::{Focus, Value};

const SEQUENCE: &str = "a sequence";

/// Position of an original element in the rebuilt sequence.
enum Slot {
    /// Not matched; passed through unchanged
    Kept(Value),
    /// Matched as the n-th filtered element
    Filtered(usize),
}

pub(super) fn select_filtered(
    path: &CompiledPath,
    structure: &Value,
    next: &mut SelectFn<'_>,
) -> Result<()> {
    match structure {
        Value::Sequence(items) => {
            let mut matched = Vec::new();
            for item in items {
                if path.matches(item)? {
                    matched.push(item.clone());
                }
            }
            next(&Value::Sequence(matched))
        }
        leaf if leaf.is_leaf() => Ok(()),
        other => Err(NavError::shape("filterer", SEQUENCE, other.kind())),
    }
}

pub(super) fn transform_filtered(
    path: &CompiledPath,
    structure: Focus,
    next: &mut TransformFn<'_>,
) -> Result<Focus> {
    let items = match structure {
        Focus::Value(Value::Sequence(items)) => items,
        leaf if leaf.is_leaf() => return Ok(leaf),
        other => return Err(NavError::shape("filterer", SEQUENCE, other.kind())),
    };

    let mut slots = Vec::with_capacity(items.len());
    let mut matched = Vec::new();
    for item in items {
        if path.matches(&item)? {
            slots.push(Slot::Filtered(matched.len()));
            matched.push(item);
        } else {
            slots.push(Slot::Kept(item));
        }
    }

    let transformed = match next(Focus::Value(Value::Sequence(matched)))? {
        Focus::Value(Value::Sequence(transformed)) => transformed,
        Focus::Absent => Vec::new(),
        Focus::Value(other) => {
            return Err(NavError::shape("filterer", "a sequence result", other.kind()))
        }
    };
    let mut transformed: Vec<Option<Value>> = transformed.into_iter().map(Some).collect();

    let rebuilt = slots
        .into_iter()
        .filter_map(|slot| match slot {
            Slot::Kept(item) => Some(item),
            Slot::Filtered(j) => transformed
                .get_mut(j)
                .and_then(Option::take)
                .filter(Value::is_defined),
        })
        .collect();
    Ok(Value::Sequence(rebuilt).into())
}
