//! Loader configuration
//!
//! Settings can come from a TOML file; anything the file leaves out falls
//! back to the defaults below.
//!
//! ```toml
//! database = "warehouse.duckdb"
//! spec_dir = "specs"
//! data_dir = "incoming"
//! pattern = "*.txt"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for a loader run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Database file path
    pub database: PathBuf,
    /// Directory holding `<table>.csv` specification files
    pub spec_dir: PathBuf,
    /// Directory scanned for data files
    pub data_dir: PathBuf,
    /// Glob pattern data files must match inside `data_dir`
    pub pattern: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("loader.duckdb"),
            spec_dir: PathBuf::from("specs"),
            data_dir: PathBuf::from("data"),
            pattern: "*".to_string(),
        }
    }
}

impl LoaderConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read a config from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Set the database path
    pub fn with_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.database = path.into();
        self
    }

    /// Set the specification directory
    pub fn with_spec_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.spec_dir = path.into();
        self
    }

    /// Set the data directory
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Set the data file pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }
}
