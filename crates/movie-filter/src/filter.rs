//! Split-File Movie Filter

use crate::error::FilterError;
use feature_engine::{EntityFilter, EntityId, FeatureError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{info, warn};

/// Filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Directory holding `<split>.json` files
    pub data_dir: PathBuf,
    /// Splits whose ids form the working set
    pub splits: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            splits: vec!["train".to_string(), "dev".to_string(), "test".to_string()],
        }
    }
}

/// Movie filter over JSON split files (each a list of movie ids)
pub struct MovieFilter {
    config: FilterConfig,
}

impl MovieFilter {
    /// Create a new filter with given config
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Path of a split file
    pub fn split_path(&self, split: &str) -> PathBuf {
        self.config.data_dir.join(format!("{}.json", split))
    }

    /// Load the ids of one split
    pub fn load_split(&self, split: &str) -> Result<BTreeSet<EntityId>, FilterError> {
        let path = self.split_path(split);
        let content = std::fs::read_to_string(&path).map_err(|source| FilterError::Unreadable {
            path: path.clone(),
            source,
        })?;
        let ids: Vec<EntityId> =
            serde_json::from_str(&content).map_err(|source| FilterError::InvalidFormat {
                path: path.clone(),
                source,
            })?;

        let unique: BTreeSet<_> = ids.iter().copied().collect();
        if unique.len() != ids.len() {
            warn!(
                "Split {} lists {} duplicate ids",
                split,
                ids.len() - unique.len()
            );
        }
        info!("Loaded {} ids from {}", unique.len(), path.display());
        Ok(unique)
    }

    /// Union of all configured splits
    pub fn load_ids(&self) -> Result<BTreeSet<EntityId>, FilterError> {
        if self.config.splits.is_empty() {
            return Err(FilterError::NoSplits);
        }

        let mut all = BTreeSet::new();
        for split in &self.config.splits {
            let ids = self.load_split(split)?;
            let overlap = ids.intersection(&all).count();
            if overlap > 0 {
                warn!("Split {} shares {} ids with earlier splits", split, overlap);
            }
            all.extend(ids);
        }
        info!("Working set has {} movies", all.len());
        Ok(all)
    }
}

impl EntityFilter for MovieFilter {
    fn load_feature_ids(&self) -> Result<BTreeSet<EntityId>, FeatureError> {
        Ok(self.load_ids()?)
    }
}
