//! Errors shared by the static data loaders and configuration types.

use std::path::PathBuf;
use thiserror::Error;

/// A static input artifact (recipe file, craft-mod table, price file) could
/// not be loaded. Callers treat this as fatal for that artifact rather than
/// continuing with an empty table.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No entries found in {0}")]
    Empty(String),
}

impl SourceError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        SourceError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: u64 },

    #[error("Invalid pattern for {field}: {message}")]
    InvalidPattern { field: &'static str, message: String },
}
