//! Error types for path navigation.

use thiserror::Error;

/// Errors that can occur while selecting or transforming through a path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavError {
    /// A navigator was applied to a value of the wrong kind.
    #[error("{navigator} expected {expected}, found {found}")]
    ShapeMismatch {
        navigator: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    /// A write went to an index outside the sequence.
    #[error("index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange { index: isize, len: usize },
    /// A transformed mapping key was not a string or integer.
    #[error("mapping keys must be strings or integers, found {found}")]
    InvalidKey { found: &'static str },
    /// A transformed mapping entry was not a `[key, value]` pair.
    #[error("mapping entries must be [key, value] pairs, found {found}")]
    InvalidEntry { found: &'static str },
    /// `select_one` in strict mode matched more than one focus.
    #[error("expected at most one focus, found {count}")]
    MultipleFocuses { count: usize },
    /// A transform removed the root structure itself.
    #[error("transform removed the root structure")]
    RootRemoved,
    /// Raised by user parsers and custom navigators.
    #[error("{0}")]
    Custom(String),
}

impl NavError {
    pub fn shape(navigator: &'static str, expected: &'static str, found: &'static str) -> Self {
        Self::ShapeMismatch {
            navigator,
            expected,
            found,
        }
    }

    /// Create a new Custom error
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}

pub type Result<T, E = NavError> = std::result::Result<T, E>;
