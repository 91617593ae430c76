//! navpath - composable navigators for nested data.
//!
//! One path expression both queries and functionally updates any number of
//! focus points inside a structure of sequences and mappings.
//!
//! # Example
//!
//! ```
//! use navpath::{path, setval, select, Value, ALL};
//! use navpath::document::from_yaml_str;
//!
//! let data = from_yaml_str("{items: [{price: 3}, {price: 5}]}").unwrap();
//! assert_eq!(
//!     select(path!["items", ALL, "price"], &data).unwrap(),
//!     vec![Value::from(3), Value::from(5)]
//! );
//!
//! let free = setval(path!["items", ALL, "price"], Value::from(0), data).unwrap();
//! assert_eq!(free, from_yaml_str("{items: [{price: 0}, {price: 0}]}").unwrap());
//! ```

pub mod config;
pub mod document;
pub mod path;

pub use config::{Config, SelectOneMode};
pub use document::{Focus, Value, ABSENT};
pub use path::{
    before_index, compile, compile_with_config, compiled_select, compiled_select_one,
    compiled_setval, compiled_transform, filterer, key, nth, parser, pred, select, select_one,
    setval, submap, transform, view, CompiledPath, NavError, Navigate, Navigator, Step,
    AFTER_ELEM, ALL, BEFORE_ELEM, BEGINNING, END, FIRST, LAST, MAP_KEYS, MAP_VALS,
};
