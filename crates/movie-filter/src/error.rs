//! Filter Error Types

use feature_engine::FeatureError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading split files
#[derive(Debug, Error)]
pub enum FilterError {
    /// Split file missing or unreadable
    #[error("Cannot read split file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Split file is not a JSON list of ids
    #[error("Invalid split file {path}: {source}")]
    InvalidFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// No splits configured
    #[error("No splits configured")]
    NoSplits,
}

impl From<FilterError> for FeatureError {
    fn from(err: FilterError) -> Self {
        FeatureError::EntityFilter(err.to_string())
    }
}
