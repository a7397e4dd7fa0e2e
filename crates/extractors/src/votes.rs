//! Vote Count Features
//!
//! Vote counts accumulate after release, so this unit is registered as an oracle.

use feature_engine::{EntityId, ExtractionBatch, Extractor, FeatureError, FeatureMap, FeatureValue};
use std::collections::BTreeSet;
use std::sync::Arc;
use storage::{Repository, VOTES_ID};

/// IMDb vote count and its natural log
pub struct VotesExtractor {
    repository: Arc<Repository>,
}

impl VotesExtractor {
    pub fn new(repository: Arc<Repository>) -> Self {
        Self { repository }
    }
}

impl Extractor for VotesExtractor {
    fn name(&self) -> &str {
        "votes"
    }

    fn extract(&self, ids: &BTreeSet<EntityId>) -> Result<ExtractionBatch, FeatureError> {
        let mut batch = ExtractionBatch::new();
        for id in ids {
            let votes: Option<i64> = self
                .repository
                .parsed_info(*id, VOTES_ID)
                .map_err(|e| FeatureError::extraction(self.name(), e))?;

            if let Some(votes) = votes {
                let mut features = FeatureMap::new();
                features.insert("votes".to_string(), FeatureValue::Int(votes));
                features.insert(
                    "log_votes".to_string(),
                    FeatureValue::Float((votes.max(0) as f64).ln_1p()),
                );
                batch.insert(*id, features);
            }
        }
        Ok(batch)
    }
}
