//! Single-focus navigators: key, nth, pred, parser and submap.
//!
//! Each of these calls its continuation exactly once (or not at all when a
//! predicate fails) and returns what the continuation produced.

use indexmap::IndexMap;

use super::error::{NavError, Result};
use super::navigator::{ParseFn, Predicate, SelectFn, TransformFn};
use crate::document::collection::{self, merge, omit, pick, resolve_index};
use crate::document::node::{Focus, Value, UNDEFINED};

const MAPPING: &str = "a mapping";
const SEQUENCE: &str = "a sequence";

/// Transform over a structure that has no slot to descend into.
///
/// The continuation sees the same `Undefined` focus select reports there.
/// Writing a value back is a shape error; anything else leaves the
/// structure as it was.
fn transform_unreachable(
    navigator: &'static str,
    expected: &'static str,
    structure: Focus,
    next: &mut TransformFn<'_>,
) -> Result<Focus> {
    match next(Focus::Value(Value::Undefined))? {
        Focus::Value(value) if value.is_defined() => {
            Err(NavError::shape(navigator, expected, structure.kind()))
        }
        _ => Ok(structure),
    }
}

pub(super) fn select_key(name: &str, structure: &Value, next: &mut SelectFn<'_>) -> Result<()> {
    match structure {
        Value::Mapping(map) => next(map.get(name).unwrap_or(&UNDEFINED)),
        _ => next(&UNDEFINED),
    }
}

pub(super) fn transform_key(
    name: &str,
    structure: Focus,
    next: &mut TransformFn<'_>,
) -> Result<Focus> {
    // A void structure is written as a fresh mapping, but handed back as-is
    // when nothing gets written.
    let (mut map, original) = match structure {
        Focus::Value(Value::Mapping(map)) => (map, None),
        void if void.is_void() => (IndexMap::new(), Some(void)),
        other => return transform_unreachable("key", MAPPING, other, next),
    };

    let current = map
        .get_mut(name)
        .map(|slot| std::mem::replace(slot, Value::Undefined))
        .unwrap_or(Value::Undefined);

    match next(Focus::Value(current))? {
        Focus::Value(value) if value.is_defined() => match map.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                map.insert(name.to_string(), value);
            }
        },
        // ABSENT removes the entry; Undefined means there is no entry.
        _ => {
            if let Some(original) = original {
                return Ok(original);
            }
            map.shift_remove(name);
        }
    }
    Ok(Value::Mapping(map).into())
}

pub(super) fn select_nth(index: isize, structure: &Value, next: &mut SelectFn<'_>) -> Result<()> {
    let item = structure
        .as_sequence()
        .and_then(|items| resolve_index(index, items.len()).map(|idx| &items[idx]));
    next(item.unwrap_or(&UNDEFINED))
}

pub(super) fn transform_nth(
    index: isize,
    structure: Focus,
    next: &mut TransformFn<'_>,
) -> Result<Focus> {
    let (items, original) = match structure {
        Focus::Value(Value::Sequence(items)) => (items, None),
        void if void.is_void() => (Vec::new(), Some(void)),
        other => return transform_unreachable("nth", SEQUENCE, other, next),
    };

    match resolve_index(index, items.len()) {
        Some(idx) => {
            let items = collection::update_at(items, idx, |item| next(Focus::Value(item)))?;
            Ok(Value::Sequence(items).into())
        }
        None => match next(Focus::Value(Value::Undefined))? {
            Focus::Value(value) if value.is_defined() => Err(NavError::IndexOutOfRange {
                index,
                len: items.len(),
            }),
            _ => Ok(original.unwrap_or_else(|| Value::Sequence(items).into())),
        },
    }
}

pub(super) fn select_pred(f: &Predicate, structure: &Value, next: &mut SelectFn<'_>) -> Result<()> {
    if f(structure) {
        next(structure)
    } else {
        Ok(())
    }
}

pub(super) fn transform_pred(
    f: &Predicate,
    structure: Focus,
    next: &mut TransformFn<'_>,
) -> Result<Focus> {
    if f(structure.value_or_undefined()) {
        next(structure)
    } else {
        Ok(structure)
    }
}

pub(super) fn transform_parsed(
    parse: &ParseFn,
    unparse: &ParseFn,
    structure: Focus,
    next: &mut TransformFn<'_>,
) -> Result<Focus> {
    let parsed = parse(structure.value_or_undefined())?;
    match next(Focus::Value(parsed))? {
        Focus::Value(value) => Ok(Focus::Value(unparse(&value)?)),
        Focus::Absent => Ok(Focus::Absent),
    }
}

pub(super) fn select_submap(
    keys: &[String],
    structure: &Value,
    next: &mut SelectFn<'_>,
) -> Result<()> {
    match structure {
        Value::Mapping(map) => next(&Value::Mapping(pick(keys, map))),
        void if void.is_void() => next(&Value::Mapping(IndexMap::new())),
        other => Err(NavError::shape("submap", MAPPING, other.kind())),
    }
}

pub(super) fn transform_submap(
    keys: &[String],
    structure: Focus,
    next: &mut TransformFn<'_>,
) -> Result<Focus> {
    let (map, original) = match structure {
        Focus::Value(Value::Mapping(map)) => (map, None),
        void if void.is_void() => (IndexMap::new(), Some(void)),
        other => return Err(NavError::shape("submap", MAPPING, other.kind())),
    };

    let picked = pick(keys, &map);
    let sub = match next(Focus::Value(Value::Mapping(picked)))? {
        Focus::Value(Value::Mapping(sub)) => sub,
        Focus::Absent => IndexMap::new(),
        Focus::Value(other) => {
            return Err(NavError::shape("submap", "a mapping result", other.kind()))
        }
    };

    if sub.is_empty() {
        if let Some(original) = original {
            return Ok(original);
        }
    }
    // Submap keys the continuation dropped are dropped from the result.
    let dropped: Vec<String> = keys
        .iter()
        .filter(|name| !sub.contains_key(*name))
        .cloned()
        .collect();
    Ok(Value::Mapping(merge(omit(&dropped, map), sub)).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::from_yaml_str;

    fn yaml(text: &str) -> Value {
        from_yaml_str(text).unwrap()
    }

    fn collect_key(name: &str, structure: &Value) -> Vec<Value> {
        let mut seen = Vec::new();
        select_key(name, structure, &mut |v: &Value| {
            seen.push(v.clone());
            Ok(())
        })
        .unwrap();
        seen
    }

    #[test]
    fn test_select_missing_key_yields_undefined() {
        assert_eq!(collect_key("z", &yaml("{a: 1}")), vec![Value::Undefined]);
        assert_eq!(collect_key("a", &yaml("[1, 2]")), vec![Value::Undefined]);
    }

    #[test]
    fn test_transform_key_keeps_position() {
        let result = transform_key("a", yaml("{a: 1, b: 2}").into(), &mut |_| {
            Ok(Value::Integer(9).into())
        })
        .unwrap();
        assert_eq!(result, Focus::Value(yaml("{a: 9, b: 2}")));
    }

    #[test]
    fn test_transform_key_on_void_creates_mapping() {
        let result =
            transform_key("a", Value::Null.into(), &mut |_| Ok(Value::Integer(1).into())).unwrap();
        assert_eq!(result, Focus::Value(yaml("{a: 1}")));

        let untouched = transform_key("a", Value::Null.into(), &mut |v| Ok(v)).unwrap();
        assert_eq!(untouched, Focus::Value(Value::Null));
    }

    #[test]
    fn test_transform_key_on_scalar_sees_undefined() {
        let mut seen = Vec::new();
        let result = transform_key("a", Value::Integer(1).into(), &mut |v| {
            seen.push(v.clone());
            Ok(v)
        })
        .unwrap();
        assert_eq!(seen, vec![Focus::Value(Value::Undefined)]);
        assert_eq!(result, Focus::Value(Value::Integer(1)));

        let removed = transform_key("a", Value::Integer(1).into(), &mut |_| Ok(Focus::Absent));
        assert_eq!(removed.unwrap(), Focus::Value(Value::Integer(1)));
    }

    #[test]
    fn test_transform_key_rejects_writes_into_scalars() {
        let err = transform_key("a", Value::Integer(1).into(), &mut |_| {
            Ok(Value::Integer(2).into())
        })
        .unwrap_err();
        assert_eq!(err, NavError::shape("key", "a mapping", "integer"));
    }

    #[test]
    fn test_transform_nth_on_mapping() {
        let data = yaml("{a: 1}");
        let unchanged = transform_nth(0, data.clone().into(), &mut |v| Ok(v)).unwrap();
        assert_eq!(unchanged, Focus::Value(data.clone()));

        let err = transform_nth(0, data.into(), &mut |_| Ok(Value::Integer(0).into())).unwrap_err();
        assert_eq!(err, NavError::shape("nth", "a sequence", "mapping"));
    }

    #[test]
    fn test_transform_nth_out_of_range() {
        let data = yaml("[1, 2]");
        let unchanged = transform_nth(5, data.clone().into(), &mut |v| Ok(v)).unwrap();
        assert_eq!(unchanged, Focus::Value(data.clone()));

        let err = transform_nth(5, data.into(), &mut |_| Ok(Value::Integer(0).into())).unwrap_err();
        assert_eq!(err, NavError::IndexOutOfRange { index: 5, len: 2 });
    }

    #[test]
    fn test_transform_submap_drops_removed_keys() {
        let result = transform_submap(
            &["a".to_string(), "b".to_string()],
            yaml("{a: 1, b: 2, c: 3}").into(),
            &mut |_| Ok(yaml("{b: 20}").into()),
        )
        .unwrap();
        assert_eq!(result, Focus::Value(yaml("{b: 20, c: 3}")));
    }
}
