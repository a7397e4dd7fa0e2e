//! Run Inputs

use crate::types::EntityId;
use crate::FeatureError;
use std::collections::BTreeSet;

/// A movie joined with its rating
#[derive(Debug, Clone, PartialEq)]
pub struct RatedMovie {
    pub id: EntityId,
    pub title: String,
    pub rating: f64,
}

/// Yields rated movies restricted to a working set of ids
pub trait RatingSource {
    /// Movies in `ids` that have a rating. Movies without one are omitted.
    fn rated_movies(&self, ids: &BTreeSet<EntityId>) -> Result<Vec<RatedMovie>, FeatureError>;
}

/// Supplies the working set of movie ids for a run
pub trait EntityFilter {
    fn load_feature_ids(&self) -> Result<BTreeSet<EntityId>, FeatureError>;
}
