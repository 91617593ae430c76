//! Configuration system for navpath.
//!
//! This module provides the configuration structure for compiled paths with
//! sensible defaults and support for serialization/deserialization via serde.
//! Configuration can be loaded from TOML files.
//!
//! # Example
//!
//! ```
//! use navpath::config::{Config, SelectOneMode};
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.select_one, SelectOneMode::Strict);
//! assert!(!config.allow_root_removal);
//!
//! // Create custom configuration
//! let custom = Config {
//!     select_one: SelectOneMode::First,
//!     ..Config::default()
//! };
//! assert_eq!(custom.select_one, SelectOneMode::First);
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How `select_one` resolves a path that reaches several focuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectOneMode {
    /// More than one focus is an error
    #[default]
    Strict,
    /// The first focus in traversal order wins
    First,
    /// The last focus in traversal order wins
    Last,
}

/// Configuration for compiled paths.
///
/// # Fields
///
/// * `select_one` - Resolution of multi-focus `select_one` calls (default: strict)
/// * `allow_root_removal` - A transform that removes the root yields null
///   instead of an error (default: false)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Resolution of multi-focus `select_one` calls
    #[serde(default)]
    pub select_one: SelectOneMode,

    /// Yield null instead of an error when a transform removes the root
    #[serde(default = "default_allow_root_removal")]
    pub allow_root_removal: bool,
}

/// Returns the default for root removal.
fn default_allow_root_removal() -> bool {
    false
}

impl Default for Config {
    fn default() -> Self {
        Self {
            select_one: SelectOneMode::default(),
            allow_root_removal: default_allow_root_removal(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/navpath/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("navpath");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to the defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents).unwrap_or_else(|e| {
                log::warn!("Ignoring config {}: {:#}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                log::warn!("Could not read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid navpath configuration")
    }
}
