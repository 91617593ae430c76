//! Non-mutating helpers over sequences and mappings.
//!
//! Every helper consumes its owned input and returns the rebuilt
//! collection. Callbacks return a `Focus`; `Focus::Absent` removes the
//! element or entry instead of replacing it.

use indexmap::IndexMap;

use super::node::{Focus, Value};
use crate::path::error::{NavError, Result};

/// Normalizes a possibly negative index against `len`.
///
/// Negative indices count from the end, so `-1` is the last element.
/// Returns `None` when the index falls outside `0..len`.
pub fn resolve_index(index: isize, len: usize) -> Option<usize> {
    let len = len as isize;
    let normalized = if index < 0 { len + index } else { index };
    if normalized >= 0 && normalized < len {
        Some(normalized as usize)
    } else {
        None
    }
}

/// Like `resolve_index`, but for insertion points, where `len` itself
/// (after the last element) is valid.
pub fn resolve_insert_index(index: isize, len: usize) -> Option<usize> {
    let len = len as isize;
    let normalized = if index < 0 { len + index } else { index };
    if normalized >= 0 && normalized <= len {
        Some(normalized as usize)
    } else {
        None
    }
}

/// Maps every element, dropping those whose result is ABSENT.
pub fn map_seq<F>(items: Vec<Value>, mut f: F) -> Result<Vec<Value>>
where
    F: FnMut(Value) -> Result<Focus>,
{
    let mut acc = Vec::with_capacity(items.len());
    for item in items {
        if let Focus::Value(value) = f(item)? {
            acc.push(value);
        }
    }
    Ok(acc)
}

/// Replaces the element at `idx` with `f(element)`, removing it on ABSENT.
///
/// `idx` must be in range; callers resolve it with `resolve_index` first.
pub fn update_at<F>(mut items: Vec<Value>, idx: usize, f: F) -> Result<Vec<Value>>
where
    F: FnOnce(Value) -> Result<Focus>,
{
    let current = std::mem::replace(&mut items[idx], Value::Undefined);
    match f(current)? {
        Focus::Value(value) => items[idx] = value,
        Focus::Absent => {
            items.remove(idx);
        }
    }
    Ok(items)
}

/// Inserts `value` before position `idx`, shifting later elements right.
pub fn insert_at(mut items: Vec<Value>, idx: usize, value: Value) -> Vec<Value> {
    items.insert(idx, value);
    items
}

/// Prepends one element.
pub fn cons(value: Value, items: Vec<Value>) -> Vec<Value> {
    insert_at(items, 0, value)
}

/// Appends one element.
pub fn conj(mut items: Vec<Value>, value: Value) -> Vec<Value> {
    items.push(value);
    items
}

pub fn concat(mut front: Vec<Value>, back: Vec<Value>) -> Vec<Value> {
    front.extend(back);
    front
}

/// Returns the entries of `map` whose keys appear in `keys`, in `keys` order.
///
/// Keys missing from `map` are skipped.
pub fn pick(keys: &[String], map: &IndexMap<String, Value>) -> IndexMap<String, Value> {
    keys.iter()
        .filter_map(|key| map.get(key).map(|value| (key.clone(), value.clone())))
        .collect()
}

/// Returns `map` without the entries named in `keys`.
pub fn omit(keys: &[String], map: IndexMap<String, Value>) -> IndexMap<String, Value> {
    map.into_iter()
        .filter(|(key, _)| !keys.contains(key))
        .collect()
}

/// Shallow merge; entries of `overlay` win and keep `base`'s position.
pub fn merge(
    mut base: IndexMap<String, Value>,
    overlay: IndexMap<String, Value>,
) -> IndexMap<String, Value> {
    for (key, value) in overlay {
        base.insert(key, value);
    }
    base
}

/// Maps every value, dropping entries whose result is ABSENT.
pub fn map_values<F>(map: IndexMap<String, Value>, mut f: F) -> Result<IndexMap<String, Value>>
where
    F: FnMut(Value) -> Result<Focus>,
{
    let mut acc = IndexMap::with_capacity(map.len());
    for (key, value) in map {
        if let Focus::Value(value) = f(value)? {
            acc.insert(key, value);
        }
    }
    Ok(acc)
}

/// Maps every key, dropping entries whose result is ABSENT.
///
/// When two keys map to the same result the later entry wins.
pub fn map_keys<F>(map: IndexMap<String, Value>, mut f: F) -> Result<IndexMap<String, Value>>
where
    F: FnMut(Value) -> Result<Focus>,
{
    let mut acc = IndexMap::with_capacity(map.len());
    for (key, value) in map {
        if let Focus::Value(new_key) = f(Value::String(key))? {
            acc.insert(key_from_value(new_key)?, value);
        }
    }
    Ok(acc)
}

/// Maps every `[key, value]` pair, dropping entries whose result is ABSENT.
pub fn map_entries<F>(map: IndexMap<String, Value>, mut f: F) -> Result<IndexMap<String, Value>>
where
    F: FnMut(Value) -> Result<Focus>,
{
    let mut acc = IndexMap::with_capacity(map.len());
    for (key, value) in map {
        let pair = Value::Sequence(vec![Value::String(key), value]);
        if let Focus::Value(result) = f(pair)? {
            let (key, value) = entry_from_value(result)?;
            acc.insert(key, value);
        }
    }
    Ok(acc)
}

/// Returns the `[key, value]` pairs of `map`.
pub fn entries(map: &IndexMap<String, Value>) -> Vec<Value> {
    map.iter()
        .map(|(key, value)| Value::Sequence(vec![Value::String(key.clone()), value.clone()]))
        .collect()
}

/// Converts a transformed key back into a mapping key.
pub fn key_from_value(value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Integer(n) => Ok(n.to_string()),
        other => Err(NavError::InvalidKey { found: other.kind() }),
    }
}

fn entry_from_value(value: Value) -> Result<(String, Value)> {
    match value {
        Value::Sequence(pair) if pair.len() == 2 => {
            let mut pair = pair.into_iter();
            match (pair.next(), pair.next()) {
                (Some(key), Some(value)) => Ok((key_from_value(key)?, value)),
                _ => Err(NavError::InvalidEntry { found: "sequence" }),
            }
        }
        other => Err(NavError::InvalidEntry { found: other.kind() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Integer).collect()
    }

    fn mapping(entries: &[(&str, i64)]) -> IndexMap<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), Value::Integer(*v)))
            .collect()
    }

    #[test]
    fn test_resolve_index() {
        assert_eq!(resolve_index(0, 3), Some(0));
        assert_eq!(resolve_index(-1, 3), Some(2));
        assert_eq!(resolve_index(3, 3), None);
        assert_eq!(resolve_index(-4, 3), None);
        assert_eq!(resolve_index(0, 0), None);
    }

    #[test]
    fn test_resolve_insert_index_allows_end() {
        assert_eq!(resolve_insert_index(3, 3), Some(3));
        assert_eq!(resolve_insert_index(-1, 3), Some(2));
        assert_eq!(resolve_insert_index(4, 3), None);
    }

    #[test]
    fn test_map_seq_drops_absent() {
        let result = map_seq(ints(&[1, 2, 3]), |v| {
            Ok(if v == Value::Integer(2) {
                Focus::Absent
            } else {
                Focus::Value(v)
            })
        })
        .unwrap();
        assert_eq!(result, ints(&[1, 3]));
    }

    #[test]
    fn test_update_at_replaces_and_removes() {
        let replaced = update_at(ints(&[1, 2, 3]), 1, |_| Ok(Value::Integer(9).into())).unwrap();
        assert_eq!(replaced, ints(&[1, 9, 3]));

        let removed = update_at(ints(&[1, 2, 3]), 0, |_| Ok(Focus::Absent)).unwrap();
        assert_eq!(removed, ints(&[2, 3]));
    }

    #[test]
    fn test_edges() {
        assert_eq!(cons(Value::Integer(0), ints(&[1])), ints(&[0, 1]));
        assert_eq!(conj(ints(&[1]), Value::Integer(2)), ints(&[1, 2]));
        assert_eq!(concat(ints(&[1]), ints(&[2, 3])), ints(&[1, 2, 3]));
        assert_eq!(insert_at(ints(&[1, 3]), 1, Value::Integer(2)), ints(&[1, 2, 3]));
    }

    #[test]
    fn test_pick_omit_merge() {
        let map = mapping(&[("a", 1), ("b", 2), ("c", 3)]);
        let keys = vec!["c".to_string(), "a".to_string(), "z".to_string()];

        let picked = pick(&keys, &map);
        assert_eq!(picked, mapping(&[("c", 3), ("a", 1)]));

        let omitted = omit(&keys, map.clone());
        assert_eq!(omitted, mapping(&[("b", 2)]));

        let merged = merge(map, mapping(&[("b", 20), ("d", 4)]));
        assert_eq!(merged, mapping(&[("a", 1), ("b", 20), ("c", 3), ("d", 4)]));
    }

    #[test]
    fn test_map_keys_rejects_non_string_keys() {
        let err = map_keys(mapping(&[("a", 1)]), |_| Ok(Value::Bool(true).into())).unwrap_err();
        assert_eq!(err, NavError::InvalidKey { found: "boolean" });
    }

    #[test]
    fn test_map_entries_requires_pairs() {
        let err = map_entries(mapping(&[("a", 1)]), |_| Ok(Value::Integer(1).into())).unwrap_err();
        assert_eq!(err, NavError::InvalidEntry { found: "integer" });

        let swapped = map_entries(mapping(&[("a", 1)]), |pair| match pair {
            Value::Sequence(items) => {
                Ok(Value::Sequence(vec![items[1].clone(), items[0].clone()]).into())
            }
            other => Ok(other.into()),
        });
        assert_eq!(
            swapped.unwrap(),
            [("1".to_string(), Value::from("a"))].into_iter().collect::<IndexMap<_, _>>()
        );
    }

    #[test]
    fn test_entries() {
        let pairs = entries(&mapping(&[("a", 1)]));
        assert_eq!(
            pairs,
            vec![Value::Sequence(vec![Value::from("a"), Value::Integer(1)])]
        );
    }
}
