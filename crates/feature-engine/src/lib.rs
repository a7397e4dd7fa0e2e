//! Feature Assembly Engine
//!
//! Selects extraction units for a run mode, runs them through the cache and
//! merges their output into one record per movie.

mod assembler;
mod registry;
mod source;
mod types;
mod unit;

pub use assembler::{merge_batch, FeatureAssembler, FeatureSink, JsonFileSink, RunSummary};
pub use registry::{RunMode, Selection, UnitRegistry};
pub use source::{EntityFilter, RatedMovie, RatingSource};
pub use types::{
    round_rating, BaseRecord, EntityId, ExtractionBatch, FeatureMap, FeatureValue, FullFeatureSet,
};
pub use unit::{cache_key, Combinator, Extractor, ExtractorDescriptor};

use feature_cache::CacheError;
use thiserror::Error;

/// Errors raised while assembling features
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("Rating source error: {0}")]
    RatingSource(String),
    #[error("Entity filter error: {0}")]
    EntityFilter(String),
    #[error("Extractor '{unit}' failed: {reason}")]
    ExtractionFailed { unit: String, reason: String },
    #[error("Combinator '{unit}' failed for movie {entity}: {reason}")]
    CombinationFailed {
        unit: String,
        entity: EntityId,
        reason: String,
    },
    #[error("Unit '{unit}' produced non-finite value for '{feature}' of movie {entity}")]
    NonFiniteValue {
        unit: String,
        entity: EntityId,
        feature: String,
    },
    #[error("Duplicate {kind} unit: {name}")]
    DuplicateUnit { kind: &'static str, name: String },
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

impl FeatureError {
    /// Shorthand for an extractor failure
    pub fn extraction(unit: &str, reason: impl ToString) -> Self {
        FeatureError::ExtractionFailed {
            unit: unit.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Shorthand for a combinator failure
    pub fn combination(unit: &str, entity: EntityId, reason: impl ToString) -> Self {
        FeatureError::CombinationFailed {
            unit: unit.to_string(),
            entity,
            reason: reason.to_string(),
        }
    }
}
