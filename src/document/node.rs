//! Structure representation for navigation.
//!
//! This module provides the value types that navigators walk over. A
//! `Value` is a scalar leaf, an ordered sequence, or a keyed mapping, and
//! nests arbitrarily. Transforms never mutate a `Value` in place; they
//! consume it and rebuild the parts along the navigated path.
//!
//! `Focus` wraps a value with the ABSENT marker used by transform
//! continuations to remove an element, and by insertion points to signal
//! that nothing is there yet.
//!
//! # Example
//!
//! ```
//! use navpath::document::node::{Focus, Value, ABSENT};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), Value::from("navpath"));
//! map.insert("version".to_string(), Value::from(1));
//! let object = Value::Mapping(map);
//! assert!(object.is_mapping());
//!
//! let focus = Focus::from(Value::from(2)).map(|v| match v {
//!     Value::Integer(n) => Value::Integer(n * 10),
//!     other => other,
//! });
//! assert_eq!(focus, Focus::Value(Value::Integer(20)));
//! assert!(ABSENT.is_absent());
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A structure value.
///
/// Mappings keep insertion order so rebuilt structures print the way they
/// were loaded, although navigation itself never depends on that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// An explicit null
    Null,
    /// A boolean
    Bool(bool),
    /// An integer number
    Integer(i64),
    /// A floating point number
    Float(f64),
    /// A string
    String(String),
    /// An ordered sequence of values
    Sequence(Vec<Value>),
    /// A keyed mapping of values
    Mapping(IndexMap<String, Value>),
    /// The focus produced by a missing key or index.
    ///
    /// Never produced by deserialization; serializes as null.
    #[serde(skip_deserializing)]
    Undefined,
}

/// Shared `Undefined` for select continuations that need a reference.
pub(crate) static UNDEFINED: Value = Value::Undefined;

impl Value {
    /// Returns true if this value is a mapping.
    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    /// Returns true if this value is a sequence.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    /// Returns true for every value except `Undefined`.
    ///
    /// # Example
    ///
    /// ```
    /// use navpath::document::node::Value;
    ///
    /// assert!(Value::Null.is_defined());
    /// assert!(!Value::Undefined.is_defined());
    /// ```
    pub fn is_defined(&self) -> bool {
        !matches!(self, Value::Undefined)
    }

    /// Returns true for `Null` and `Undefined`, the values navigators treat
    /// as "nothing here yet".
    pub fn is_void(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// Returns true for anything that is not a sequence or mapping. Leaves
    /// hold no elements.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    /// Returns the sequence elements, if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the mapping entries, if this is a mapping.
    pub fn as_mapping(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Undefined => "undefined",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Mapping(map)
    }
}

/// A transform focus: either a value or the ABSENT marker.
///
/// Returning `Focus::Absent` from a transform continuation always removes
/// the focus from its parent. It never means "keep the original".
#[derive(Debug, Clone, PartialEq)]
pub enum Focus {
    /// A present value
    Value(Value),
    /// Nothing at this position; removal when returned from an update
    Absent,
}

/// The ABSENT marker.
pub const ABSENT: Focus = Focus::Absent;

impl Focus {
    pub fn is_absent(&self) -> bool {
        matches!(self, Focus::Absent)
    }

    /// Returns true for ABSENT and for void values (`Null`, `Undefined`).
    pub fn is_void(&self) -> bool {
        match self {
            Focus::Absent => true,
            Focus::Value(value) => value.is_void(),
        }
    }

    /// Returns true for ABSENT and for leaf values.
    pub fn is_leaf(&self) -> bool {
        match self {
            Focus::Absent => true,
            Focus::Value(value) => value.is_leaf(),
        }
    }

    /// Returns the value, if present.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Focus::Value(value) => Some(value),
            Focus::Absent => None,
        }
    }

    /// Consumes the focus, returning the value if present.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Focus::Value(value) => Some(value),
            Focus::Absent => None,
        }
    }

    /// Applies `f` to a present value; ABSENT stays ABSENT.
    pub fn map<F>(self, f: F) -> Focus
    where
        F: FnOnce(Value) -> Value,
    {
        match self {
            Focus::Value(value) => Focus::Value(f(value)),
            Focus::Absent => Focus::Absent,
        }
    }

    /// Borrows the value, reading ABSENT as `Undefined`.
    pub(crate) fn value_or_undefined(&self) -> &Value {
        self.value().unwrap_or(&UNDEFINED)
    }

    /// Name of the focus kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Focus::Value(value) => value.kind(),
            Focus::Absent => "absent",
        }
    }
}

impl From<Value> for Focus {
    fn from(value: Value) -> Self {
        Focus::Value(value)
    }
}

impl From<Option<Value>> for Focus {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Focus::Absent, Focus::Value)
    }
}

impl From<bool> for Focus {
    fn from(b: bool) -> Self {
        Focus::Value(Value::Bool(b))
    }
}

impl From<i64> for Focus {
    fn from(n: i64) -> Self {
        Focus::Value(Value::Integer(n))
    }
}

impl From<i32> for Focus {
    fn from(n: i32) -> Self {
        Focus::Value(Value::Integer(n as i64))
    }
}

impl From<f64> for Focus {
    fn from(n: f64) -> Self {
        Focus::Value(Value::Float(n))
    }
}

impl From<&str> for Focus {
    fn from(s: &str) -> Self {
        Focus::Value(Value::String(s.to_string()))
    }
}

impl From<String> for Focus {
    fn from(s: String) -> Self {
        Focus::Value(Value::String(s))
    }
}
