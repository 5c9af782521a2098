//! Search settings, optionally read from a TOML file.
//!
//! Every field has a default, so an empty file is a valid configuration:
//! ```toml
//! matrix = "matrix.txt"
//! target_sum = 100
//! progress_interval = 5000
//! # max_seconds = 60
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::loader::DEFAULT_MATRIX_FILE;
use crate::search::DEFAULT_PROGRESS_INTERVAL;

/// The column sum that is searched for if none is specified.
pub const DEFAULT_TARGET_SUM: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// File to read the matrix from.
    pub matrix: PathBuf,

    /// Every column has to sum to this.
    pub target_sum: i64,

    /// Report progress every this many candidates. Zero disables it.
    pub progress_interval: u64,

    /// Give up after this many seconds.
    pub max_seconds: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            matrix: PathBuf::from(DEFAULT_MATRIX_FILE),
            target_sum: DEFAULT_TARGET_SUM,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            max_seconds: None,
        }
    }
}

impl SearchConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_owned(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}'", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
