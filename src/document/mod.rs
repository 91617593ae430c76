//! Structures that navigators walk over.
//!
//! `node` defines the `Value` model and the ABSENT-aware `Focus`;
//! `collection` holds the non-mutating sequence and mapping helpers the
//! navigators are built from.

pub mod collection;
pub mod node;

use anyhow::{Context, Result};

pub use node::{Focus, Value, ABSENT};

/// Parses YAML (or JSON, which is a subset) text into a `Value`.
///
/// # Example
///
/// ```
/// use navpath::document::from_yaml_str;
///
/// let value = from_yaml_str("{a: 1, b: [true, null]}").unwrap();
/// assert!(value.is_mapping());
/// ```
///
/// # Errors
///
/// Returns an error if the text is not valid YAML or uses mapping keys
/// that are not strings.
pub fn from_yaml_str(text: &str) -> Result<Value> {
    serde_yaml::from_str(text).context("Failed to parse YAML structure")
}

/// Renders a `Value` as YAML text.
pub fn to_yaml_string(value: &Value) -> Result<String> {
    serde_yaml::to_string(value).context("Failed to serialize structure as YAML")
}
