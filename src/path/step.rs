//! Path steps and their resolution to navigators.
//!
//! A path is written as a list of steps. Besides full navigators, a step
//! can be a bare key, a bare index or a bare predicate; each shorthand
//! resolves to its built-in navigator once, when the path is compiled.

use std::fmt;
use std::sync::Arc;

use super::navigator::{Navigator, Predicate};
use crate::document::node::Value;

/// One element of a path.
#[derive(Clone)]
pub enum Step {
    /// A navigator used as-is
    Navigator(Navigator),
    /// Shorthand for `key(name)`
    Key(String),
    /// Shorthand for `nth(index)`
    Index(isize),
    /// Shorthand for `pred(f)`
    Predicate(Predicate),
}

impl Step {
    /// Builds a predicate shorthand step.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Step::Predicate(Arc::new(f))
    }

    /// Resolves the step to its navigator.
    pub fn resolve(self) -> Navigator {
        match self {
            Step::Navigator(navigator) => navigator,
            Step::Key(name) => Navigator::Key(name),
            Step::Index(index) => Navigator::Nth(index),
            Step::Predicate(f) => Navigator::Pred(f),
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Navigator(navigator) => write!(f, "{:?}", navigator),
            Step::Key(name) => write!(f, "{:?}", name),
            Step::Index(index) => write!(f, "{}", index),
            Step::Predicate(_) => write!(f, "<predicate>"),
        }
    }
}

impl From<Navigator> for Step {
    fn from(navigator: Navigator) -> Self {
        Step::Navigator(navigator)
    }
}

impl From<&str> for Step {
    fn from(name: &str) -> Self {
        Step::Key(name.to_string())
    }
}

impl From<String> for Step {
    fn from(name: String) -> Self {
        Step::Key(name)
    }
}

impl From<&String> for Step {
    fn from(name: &String) -> Self {
        Step::Key(name.clone())
    }
}

impl From<isize> for Step {
    fn from(index: isize) -> Self {
        Step::Index(index)
    }
}

impl From<i32> for Step {
    fn from(index: i32) -> Self {
        Step::Index(index as isize)
    }
}

impl From<i64> for Step {
    fn from(index: i64) -> Self {
        Step::Index(index as isize)
    }
}

impl From<usize> for Step {
    fn from(index: usize) -> Self {
        Step::Index(index as isize)
    }
}

impl From<Predicate> for Step {
    fn from(f: Predicate) -> Self {
        Step::Predicate(f)
    }
}

/// Builds a `Vec<Step>` from mixed navigators and shorthands.
///
/// # Example
///
/// ```
/// use navpath::path;
/// use navpath::path::{select, ALL};
/// use navpath::document::{from_yaml_str, Value};
///
/// let data = from_yaml_str("{users: [{name: ann}, {name: bo}]}").unwrap();
/// let names = select(path!["users", ALL, "name"], &data).unwrap();
/// assert_eq!(names, vec![Value::from("ann"), Value::from("bo")]);
/// ```
#[macro_export]
macro_rules! path {
    () => {
        ::std::vec::Vec::<$crate::path::Step>::new()
    };
    ($($step:expr),+ $(,)?) => {
        vec![$($crate::path::Step::from($step)),+]
    };
}
