//! Multi-focus and insertion-point navigators.
//!
//! These work on a whole sequence or mapping per call. Leaves (scalars,
//! null, undefined, ABSENT) hold no elements: the multi-focus navigators
//! select nothing from them and return them unchanged. The insertion points
//! read void structures (null, undefined, ABSENT) as an empty sequence so
//! elements can be added, and reject other scalars.

use super::error::{NavError, Result};
use super::navigator::{SelectFn, TransformFn};
use crate::document::collection::{
    self, concat, conj, cons, entries, insert_at, resolve_insert_index,
};
use crate::document::node::{Focus, Value};

const MAPPING: &str = "a mapping";
const SEQUENCE: &str = "a sequence";

pub(super) fn select_all(structure: &Value, next: &mut SelectFn<'_>) -> Result<()> {
    match structure {
        Value::Sequence(items) => items.iter().try_for_each(|item| next(item)),
        Value::Mapping(map) => entries(map).iter().try_for_each(|pair| next(pair)),
        _ => Ok(()),
    }
}

pub(super) fn transform_all(structure: Focus, next: &mut TransformFn<'_>) -> Result<Focus> {
    match structure {
        Focus::Value(Value::Sequence(items)) => {
            let items = collection::map_seq(items, |item| next(Focus::Value(item)))?;
            Ok(Value::Sequence(items).into())
        }
        Focus::Value(Value::Mapping(map)) => {
            let map = collection::map_entries(map, |pair| next(Focus::Value(pair)))?;
            Ok(Value::Mapping(map).into())
        }
        leaf => Ok(leaf),
    }
}

pub(super) fn select_map_vals(structure: &Value, next: &mut SelectFn<'_>) -> Result<()> {
    match structure {
        Value::Mapping(map) => map.values().try_for_each(|value| next(value)),
        leaf if leaf.is_leaf() => Ok(()),
        other => Err(NavError::shape("MAP_VALS", MAPPING, other.kind())),
    }
}

pub(super) fn transform_map_vals(structure: Focus, next: &mut TransformFn<'_>) -> Result<Focus> {
    match structure {
        Focus::Value(Value::Mapping(map)) => {
            let map = collection::map_values(map, |value| next(Focus::Value(value)))?;
            Ok(Value::Mapping(map).into())
        }
        leaf if leaf.is_leaf() => Ok(leaf),
        other => Err(NavError::shape("MAP_VALS", MAPPING, other.kind())),
    }
}

pub(super) fn select_map_keys(structure: &Value, next: &mut SelectFn<'_>) -> Result<()> {
    match structure {
        Value::Mapping(map) => map
            .keys()
            .try_for_each(|key| next(&Value::String(key.clone()))),
        leaf if leaf.is_leaf() => Ok(()),
        other => Err(NavError::shape("MAP_KEYS", MAPPING, other.kind())),
    }
}

pub(super) fn transform_map_keys(structure: Focus, next: &mut TransformFn<'_>) -> Result<Focus> {
    match structure {
        Focus::Value(Value::Mapping(map)) => {
            let map = collection::map_keys(map, |key| next(Focus::Value(key)))?;
            Ok(Value::Mapping(map).into())
        }
        leaf if leaf.is_leaf() => Ok(leaf),
        other => Err(NavError::shape("MAP_KEYS", MAPPING, other.kind())),
    }
}

/// FIRST and LAST: the element at one end, if there is one.
pub(super) fn select_edge(
    name: &'static str,
    structure: &Value,
    next: &mut SelectFn<'_>,
    last: bool,
) -> Result<()> {
    match structure {
        Value::Sequence(items) => {
            let item = if last { items.last() } else { items.first() };
            match item {
                Some(item) => next(item),
                None => Ok(()),
            }
        }
        leaf if leaf.is_leaf() => Ok(()),
        other => Err(NavError::shape(name, SEQUENCE, other.kind())),
    }
}

pub(super) fn transform_edge(
    name: &'static str,
    structure: Focus,
    next: &mut TransformFn<'_>,
    last: bool,
) -> Result<Focus> {
    match structure {
        Focus::Value(Value::Sequence(items)) if items.is_empty() => {
            Ok(Value::Sequence(items).into())
        }
        Focus::Value(Value::Sequence(items)) => {
            let idx = if last { items.len() - 1 } else { 0 };
            let items = collection::update_at(items, idx, |item| next(Focus::Value(item)))?;
            Ok(Value::Sequence(items).into())
        }
        leaf if leaf.is_leaf() => Ok(leaf),
        other => Err(NavError::shape(name, SEQUENCE, other.kind())),
    }
}

fn sequence_or_empty(name: &'static str, structure: Focus) -> Result<Vec<Value>> {
    match structure {
        Focus::Value(Value::Sequence(items)) => Ok(items),
        void if void.is_void() => Ok(Vec::new()),
        other => Err(NavError::shape(name, SEQUENCE, other.kind())),
    }
}

/// BEGINNING and END: the continuation sees an empty sequence; a sequence
/// result is spliced in, any other value is added as one element.
pub(super) fn transform_splice(
    name: &'static str,
    structure: Focus,
    next: &mut TransformFn<'_>,
    at_end: bool,
) -> Result<Focus> {
    let items = sequence_or_empty(name, structure)?;
    let items = match next(Focus::Value(Value::Sequence(Vec::new())))? {
        Focus::Value(Value::Sequence(added)) if at_end => concat(items, added),
        Focus::Value(Value::Sequence(added)) => concat(added, items),
        Focus::Value(value) if at_end => conj(items, value),
        Focus::Value(value) => cons(value, items),
        Focus::Absent => items,
    };
    Ok(Value::Sequence(items).into())
}

/// BEFORE_ELEM and AFTER_ELEM: the continuation sees ABSENT and any value
/// it returns becomes a new first or last element.
pub(super) fn transform_void_edge(
    name: &'static str,
    structure: Focus,
    next: &mut TransformFn<'_>,
    at_end: bool,
) -> Result<Focus> {
    let items = sequence_or_empty(name, structure)?;
    let items = match next(Focus::Absent)? {
        Focus::Value(value) if at_end => conj(items, value),
        Focus::Value(value) => cons(value, items),
        Focus::Absent => items,
    };
    Ok(Value::Sequence(items).into())
}

pub(super) fn transform_before_index(
    index: isize,
    structure: Focus,
    next: &mut TransformFn<'_>,
) -> Result<Focus> {
    let items = sequence_or_empty("before_index", structure)?;
    match next(Focus::Absent)? {
        Focus::Value(value) => match resolve_insert_index(index, items.len()) {
            Some(idx) => Ok(Value::Sequence(insert_at(items, idx, value)).into()),
            None => Err(NavError::IndexOutOfRange {
                index,
                len: items.len(),
            }),
        },
        Focus::Absent => Ok(Value::Sequence(items).into()),
    }
}
