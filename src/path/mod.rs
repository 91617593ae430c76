//! Composable navigators for selecting and transforming nested structures.
//!
//! A path is a list of steps, each a navigator or a shorthand for one. The
//! same path answers queries (`select`, `select_one`) and drives functional
//! updates (`transform`, `setval`).
//!
//! # Navigators
//!
//! - `"key"` / `key(name)` - Value under a mapping key
//! - `0`, `-1` / `nth(index)` - Sequence element (negative counts from the end)
//! - `pred(f)` - Continue only where `f` holds
//! - `ALL` - Every sequence element or `[key, value]` mapping pair
//! - `MAP_VALS` / `MAP_KEYS` - Every mapping value / key
//! - `FIRST` / `LAST` - First / last sequence element
//! - `BEGINNING` / `END` - Empty sequence at either end, for splicing
//! - `BEFORE_ELEM` / `AFTER_ELEM` / `before_index(i)` - Void insertion points
//! - `view(f)` / `parser(parse, unparse)` / `submap(keys)` - Derived views
//! - `filterer(path)` - Elements in which `path` finds something
//!
//! # Examples
//!
//! ```
//! // select(["a"], {a: 1, b: 2})                     -> [1]
//! // setval([ALL, "price"], 0, items)               - zero every price
//! // transform([END], |_| [9], [1, 2])              -> [1, 2, 9]
//! // select([filterer(["a"]), ALL, "a"], data)      - "a" of elements that have one
//! ```

pub mod compiler;
pub mod error;
mod filterer;
mod keyed;
pub mod navigator;
pub mod ops;
mod positional;
pub mod step;

pub use compiler::{compile, compile_with_config, CompiledPath};
pub use error::{NavError, Result};
pub use navigator::{
    before_index, filterer, key, nth, parser, pred, submap, view, Navigate, Navigator, ParseFn,
    Predicate, SelectFn, TransformFn, ViewFn, AFTER_ELEM, ALL, BEFORE_ELEM, BEGINNING, END,
    FIRST, LAST, MAP_KEYS, MAP_VALS,
};
pub use ops::{
    compiled_select, compiled_select_one, compiled_setval, compiled_transform, select,
    select_one, setval, transform,
};
pub use step::Step;
