//! The navigator protocol and the built-in catalogue.
//!
//! A navigator knows how to move one step into a structure, and nothing
//! about what happens after that step. Both operations receive a
//! continuation standing for the rest of the path:
//!
//! - `select` calls `next` once per focus it reaches.
//! - `transform` calls `next` once per focus and rebuilds the structure
//!   around whatever `next` returns. `Focus::Absent` removes the focus.
//!
//! Because both operations visit the same focuses in the same order, one
//! chain of navigators serves queries and updates alike.

use std::fmt;
use std::sync::Arc;

use super::compiler::{compile, CompiledPath};
use super::error::Result;
use super::step::Step;
use super::{filterer as filtered, keyed, positional};
use crate::document::node::{Focus, Value};

/// Select continuation: receives each focus in traversal order.
pub type SelectFn<'a> = dyn FnMut(&Value) -> Result<()> + 'a;

/// Transform continuation: maps a focus to its replacement.
pub type TransformFn<'a> = dyn FnMut(Focus) -> Result<Focus> + 'a;

/// Predicate used by `pred` and predicate shorthand steps.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Read-only projection used by `view`.
pub type ViewFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// One direction of a `parser` pair.
pub type ParseFn = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// The two operations every navigator implements.
///
/// `select` and `transform` must visit the same focuses in the same order.
/// The insertion points (`BEGINNING`, `END`, `BEFORE_ELEM`, `AFTER_ELEM`,
/// `before_index`) are the one exception: they read nothing, so `select`
/// passes nothing on, while `transform` calls `next` exactly once with the
/// empty sequence or ABSENT it is about to insert.
pub trait Navigate: Send + Sync {
    /// Visits every focus reachable from `structure`, passing each to `next`.
    fn select(&self, structure: &Value, next: &mut SelectFn<'_>) -> Result<()>;

    /// Rebuilds `structure` with every focus replaced by `next(focus)`.
    fn transform(&self, structure: Focus, next: &mut TransformFn<'_>) -> Result<Focus>;
}

/// A path navigator.
///
/// The fixed catalogue of built-ins plus `Custom`, which carries any
/// user-defined `Navigate` implementation.
#[derive(Clone)]
pub enum Navigator {
    /// Every element of a sequence, or every `[key, value]` pair of a mapping
    All,
    /// Every value of a mapping
    MapVals,
    /// Every key of a mapping
    MapKeys,
    /// The first element of a sequence
    First,
    /// The last element of a sequence
    Last,
    /// The empty sequence before the first element
    Beginning,
    /// The empty sequence after the last element
    End,
    /// The void element before the first element
    BeforeElem,
    /// The void element after the last element
    AfterElem,
    /// The value under a mapping key
    Key(String),
    /// The element at an index (negative counts from the end)
    Nth(isize),
    /// The void element before an index
    BeforeIndex(isize),
    /// Continues only when the predicate holds
    Pred(Predicate),
    /// A projection of the current structure
    View(ViewFn),
    /// A parsed form of the current structure, unparsed after transforms
    Parser { parse: ParseFn, unparse: ParseFn },
    /// The sub-mapping made of the named keys
    Submap(Vec<String>),
    /// The subsequence of elements in which a nested path finds something
    Filterer(CompiledPath),
    /// A user-defined navigator
    Custom(Arc<dyn Navigate>),
}

pub const ALL: Navigator = Navigator::All;
pub const MAP_VALS: Navigator = Navigator::MapVals;
pub const MAP_KEYS: Navigator = Navigator::MapKeys;
pub const FIRST: Navigator = Navigator::First;
pub const LAST: Navigator = Navigator::Last;
pub const BEGINNING: Navigator = Navigator::Beginning;
pub const END: Navigator = Navigator::End;
pub const BEFORE_ELEM: Navigator = Navigator::BeforeElem;
pub const AFTER_ELEM: Navigator = Navigator::AfterElem;

/// Navigates to the value of `name` in a mapping.
///
/// Missing keys yield an `Undefined` focus. Transforming to ABSENT removes
/// the entry; transforming a missing key on a void structure creates the
/// mapping.
pub fn key(name: impl Into<String>) -> Navigator {
    Navigator::Key(name.into())
}

/// Navigates to the element at `index`; negative indices count from the end.
pub fn nth(index: isize) -> Navigator {
    Navigator::Nth(index)
}

/// Navigates to the void element before `index`, for inserting there.
pub fn before_index(index: isize) -> Navigator {
    Navigator::BeforeIndex(index)
}

/// Stops navigation unless `f` holds for the current structure.
pub fn pred<F>(f: F) -> Navigator
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Navigator::Pred(Arc::new(f))
}

/// Navigates to `f(structure)`. Transforms replace the structure with the
/// transformed projection.
pub fn view<F>(f: F) -> Navigator
where
    F: Fn(&Value) -> Value + Send + Sync + 'static,
{
    Navigator::View(Arc::new(f))
}

/// Navigates to `parse(structure)`; transforms write back `unparse(result)`.
pub fn parser<P, U>(parse: P, unparse: U) -> Navigator
where
    P: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    U: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
{
    Navigator::Parser {
        parse: Arc::new(parse),
        unparse: Arc::new(unparse),
    }
}

/// Navigates to the mapping made of `keys` present in the structure.
pub fn submap<I, K>(keys: I) -> Navigator
where
    I: IntoIterator<Item = K>,
    K: Into<String>,
{
    Navigator::Submap(keys.into_iter().map(Into::into).collect())
}

/// Navigates to the subsequence of elements in which `path` selects at
/// least one defined focus.
///
/// # Example
///
/// ```
/// use navpath::path::{filterer, select, Step, ALL};
/// use navpath::document::from_yaml_str;
///
/// let data = from_yaml_str("[{a: 1}, {b: 2}, {a: 3}]").unwrap();
/// let path = vec![Step::from(filterer(["a"])), Step::from(ALL), Step::from("a")];
/// let found = select(path, &data).unwrap();
/// assert_eq!(found.len(), 2);
/// ```
pub fn filterer<I, S>(path: I) -> Navigator
where
    I: IntoIterator<Item = S>,
    S: Into<Step>,
{
    Navigator::Filterer(compile(path))
}

impl Navigator {
    /// Wraps a user-defined navigator.
    pub fn custom<N>(navigator: N) -> Self
    where
        N: Navigate + 'static,
    {
        Navigator::Custom(Arc::new(navigator))
    }

    /// Builds a custom navigator from a select and a transform function.
    pub fn from_fns<S, T>(select: S, transform: T) -> Self
    where
        S: Fn(&Value, &mut SelectFn<'_>) -> Result<()> + Send + Sync + 'static,
        T: Fn(Focus, &mut TransformFn<'_>) -> Result<Focus> + Send + Sync + 'static,
    {
        Navigator::custom(FnNavigator { select, transform })
    }

    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Navigator::All => "ALL",
            Navigator::MapVals => "MAP_VALS",
            Navigator::MapKeys => "MAP_KEYS",
            Navigator::First => "FIRST",
            Navigator::Last => "LAST",
            Navigator::Beginning => "BEGINNING",
            Navigator::End => "END",
            Navigator::BeforeElem => "BEFORE_ELEM",
            Navigator::AfterElem => "AFTER_ELEM",
            Navigator::Key(_) => "key",
            Navigator::Nth(_) => "nth",
            Navigator::BeforeIndex(_) => "before_index",
            Navigator::Pred(_) => "pred",
            Navigator::View(_) => "view",
            Navigator::Parser { .. } => "parser",
            Navigator::Submap(_) => "submap",
            Navigator::Filterer(_) => "filterer",
            Navigator::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Navigator::Key(name) => write!(f, "key({:?})", name),
            Navigator::Nth(index) => write!(f, "nth({})", index),
            Navigator::BeforeIndex(index) => write!(f, "before_index({})", index),
            Navigator::Submap(keys) => write!(f, "submap({:?})", keys),
            Navigator::Filterer(path) => write!(f, "filterer({:?})", path),
            other => write!(f, "{}", other.name()),
        }
    }
}

impl Navigate for Navigator {
    fn select(&self, structure: &Value, next: &mut SelectFn<'_>) -> Result<()> {
        match self {
            Navigator::All => positional::select_all(structure, next),
            Navigator::MapVals => positional::select_map_vals(structure, next),
            Navigator::MapKeys => positional::select_map_keys(structure, next),
            Navigator::First => positional::select_edge(self.name(), structure, next, false),
            Navigator::Last => positional::select_edge(self.name(), structure, next, true),
            // Insertion points have nothing to read.
            Navigator::Beginning
            | Navigator::End
            | Navigator::BeforeElem
            | Navigator::AfterElem
            | Navigator::BeforeIndex(_) => Ok(()),
            Navigator::Key(name) => keyed::select_key(name, structure, next),
            Navigator::Nth(index) => keyed::select_nth(*index, structure, next),
            Navigator::Pred(f) => keyed::select_pred(f, structure, next),
            Navigator::View(f) => next(&f(structure)),
            Navigator::Parser { parse, .. } => next(&parse(structure)?),
            Navigator::Submap(keys) => keyed::select_submap(keys, structure, next),
            Navigator::Filterer(path) => filtered::select_filtered(path, structure, next),
            Navigator::Custom(navigator) => navigator.select(structure, next),
        }
    }

    fn transform(&self, structure: Focus, next: &mut TransformFn<'_>) -> Result<Focus> {
        match self {
            Navigator::All => positional::transform_all(structure, next),
            Navigator::MapVals => positional::transform_map_vals(structure, next),
            Navigator::MapKeys => positional::transform_map_keys(structure, next),
            Navigator::First => positional::transform_edge(self.name(), structure, next, false),
            Navigator::Last => positional::transform_edge(self.name(), structure, next, true),
            Navigator::Beginning => {
                positional::transform_splice(self.name(), structure, next, false)
            }
            Navigator::End => positional::transform_splice(self.name(), structure, next, true),
            Navigator::BeforeElem => {
                positional::transform_void_edge(self.name(), structure, next, false)
            }
            Navigator::AfterElem => {
                positional::transform_void_edge(self.name(), structure, next, true)
            }
            Navigator::BeforeIndex(index) => {
                positional::transform_before_index(*index, structure, next)
            }
            Navigator::Key(name) => keyed::transform_key(name, structure, next),
            Navigator::Nth(index) => keyed::transform_nth(*index, structure, next),
            Navigator::Pred(f) => keyed::transform_pred(f, structure, next),
            Navigator::View(f) => next(Focus::Value(f(structure.value_or_undefined()))),
            Navigator::Parser { parse, unparse } => {
                keyed::transform_parsed(parse, unparse, structure, next)
            }
            Navigator::Submap(keys) => keyed::transform_submap(keys, structure, next),
            Navigator::Filterer(path) => filtered::transform_filtered(path, structure, next),
            Navigator::Custom(navigator) => navigator.transform(structure, next),
        }
    }
}

/// A custom navigator made of two closures.
struct FnNavigator<S, T> {
    select: S,
    transform: T,
}

impl<S, T> Navigate for FnNavigator<S, T>
where
    S: Fn(&Value, &mut SelectFn<'_>) -> Result<()> + Send + Sync,
    T: Fn(Focus, &mut TransformFn<'_>) -> Result<Focus> + Send + Sync,
{
    fn select(&self, structure: &Value, next: &mut SelectFn<'_>) -> Result<()> {
        (self.select)(structure, next)
    }

    fn transform(&self, structure: Focus, next: &mut TransformFn<'_>) -> Result<Focus> {
        (self.transform)(structure, next)
    }
}
