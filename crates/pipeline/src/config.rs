//! Pipeline Configuration
//!
//! Defaults, then `config/feature_creator.toml` (or an explicit file), then
//! `FEATURE_CREATOR__*` environment variables.

use crate::PipelineError;
use movie_filter::FilterConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Config file looked up when none is given
pub const DEFAULT_CONFIG_FILE: &str = "config/feature_creator";

/// Paths and connection settings for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// SQLite URL of the movie database
    pub database_url: String,
    /// Directory with the split id files
    pub data_dir: PathBuf,
    /// Splits forming the working set
    pub splits: Vec<String>,
    /// Directory for cached extractor output
    pub cache_dir: PathBuf,
    /// Features artifact
    pub features_path: PathBuf,
    /// Log file used when not verbose
    pub log_file: PathBuf,
    /// Split exported by `data-to-submit`
    pub submission_split: String,
    /// Output of `data-to-submit`
    pub submission_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let filter = FilterConfig::default();
        Self {
            database_url: "sqlite://data/imdb.sqlite".to_string(),
            data_dir: filter.data_dir,
            splits: filter.splits,
            cache_dir: PathBuf::from("cache"),
            features_path: PathBuf::from("data/features.json"),
            log_file: PathBuf::from("feature_creator.log"),
            submission_split: "test".to_string(),
            submission_path: PathBuf::from("data/data.json"),
        }
    }
}

impl PipelineConfig {
    /// Load configuration. An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, PipelineError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix("FEATURE_CREATOR").separator("__"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        info!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Filter settings derived from this config
    pub fn filter_config(&self) -> FilterConfig {
        FilterConfig {
            data_dir: self.data_dir.clone(),
            splits: self.splits.clone(),
        }
    }
}
