//! Feature Creator Pipeline
//!
//! Wires the movie filter, the movie database, the unit registry and the
//! cache into one feature run, and exports the submission subset.

mod cli;
mod config;
mod logging;
mod run;
mod submission;

pub use cli::{CreatorArgs, SubmitArgs};
pub use config::{PipelineConfig, DEFAULT_CONFIG_FILE};
pub use logging::{init_logging, DEFAULT_LOG_FILTER};
pub use run::{assemble, create_features, INFO_TYPES};
pub use submission::{export_submission, select_submission};

use feature_cache::CacheError;
use feature_engine::{EntityId, FeatureError};
use movie_filter::FilterError;
use storage::StorageError;
use thiserror::Error;

/// Errors surfaced by the command-line tools
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("Logging setup failed: {0}")]
    Logging(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Feature(#[from] FeatureError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error("Movie {0} is missing from the features file")]
    MissingFeatures(EntityId),
}
