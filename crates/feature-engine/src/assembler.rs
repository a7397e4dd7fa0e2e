//! Feature Assembler
//!
//! Builds the full feature set in three phases that never overlap:
//! base records, extraction (merged in selection order), combination.
//! Nothing is persisted unless every phase succeeds.

use crate::registry::Selection;
use crate::source::{EntityFilter, RatingSource};
use crate::types::{BaseRecord, EntityId, ExtractionBatch, FeatureMap, FullFeatureSet};
use crate::unit::cache_key;
use crate::FeatureError;
use feature_cache::{save_file, Cache, CacheStats, CacheStore};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Destination of the finished feature set
pub trait FeatureSink {
    fn persist(&self, features: &FullFeatureSet) -> Result<(), FeatureError>;
}

/// Writes the feature set as pretty JSON to one file
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FeatureSink for JsonFileSink {
    fn persist(&self, features: &FullFeatureSet) -> Result<(), FeatureError> {
        save_file(&self.path, features)?;
        Ok(())
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Records in the persisted feature set
    pub records: usize,
    /// Extractors run
    pub extractors: usize,
    /// Combinators run
    pub combinators: usize,
    /// Extracted rows discarded because the movie had no base record
    pub dropped_rows: usize,
    /// Cache statistics for this run
    pub cache: CacheStats,
}

/// Merge one extractor's output into the feature set.
///
/// Later values replace earlier ones with the same name. Rows for movies
/// without a base record are dropped; the number dropped is returned.
pub fn merge_batch(features: &mut FullFeatureSet, batch: ExtractionBatch) -> usize {
    let mut dropped = 0;
    for (id, extracted) in batch {
        match features.get_mut(&id) {
            Some(record) => record.features.extend(extracted),
            None => {
                debug!("Dropping features for movie {} (no base record)", id);
                dropped += 1;
            }
        }
    }
    dropped
}

/// Reject NaN and infinite values, which JSON cannot carry
fn ensure_finite(unit: &str, entity: EntityId, features: &FeatureMap) -> Result<(), FeatureError> {
    let bad = features
        .iter()
        .find(|(_, value)| value.as_f64().is_some_and(|v| !v.is_finite()));
    match bad {
        Some((feature, _)) => Err(FeatureError::NonFiniteValue {
            unit: unit.to_string(),
            entity,
            feature: feature.clone(),
        }),
        None => Ok(()),
    }
}

/// Owns the feature set for the duration of one run
pub struct FeatureAssembler<'c, S> {
    entity_ids: BTreeSet<EntityId>,
    selection: Selection,
    cache: &'c mut Cache<S>,
    features: FullFeatureSet,
    dropped_rows: usize,
}

impl<'c, S: CacheStore> FeatureAssembler<'c, S> {
    /// Create an assembler over a fixed working set of ids
    pub fn new(
        entity_ids: BTreeSet<EntityId>,
        selection: Selection,
        cache: &'c mut Cache<S>,
    ) -> Self {
        info!("Creating feature assembler for {} movies", entity_ids.len());
        Self {
            entity_ids,
            selection,
            cache,
            features: FullFeatureSet::new(),
            dropped_rows: 0,
        }
    }

    /// Create an assembler over the ids supplied by `filter`
    pub fn from_filter(
        filter: &dyn EntityFilter,
        selection: Selection,
        cache: &'c mut Cache<S>,
    ) -> Result<Self, FeatureError> {
        let ids = filter.load_feature_ids()?;
        Ok(Self::new(ids, selection, cache))
    }

    /// Run all phases and persist the result through `sink`
    pub fn run(
        mut self,
        source: &dyn RatingSource,
        sink: &dyn FeatureSink,
    ) -> Result<RunSummary, FeatureError> {
        let stats_before = self.cache.stats();

        self.generate_feature_base(source)?;
        self.extract_features()?;
        self.combine_features()?;

        sink.persist(&self.features)?;

        let stats_after = self.cache.stats();
        let summary = RunSummary {
            records: self.features.len(),
            extractors: self.selection.extractors.len(),
            combinators: self.selection.combinators.len(),
            dropped_rows: self.dropped_rows,
            cache: CacheStats {
                hits: stats_after.hits - stats_before.hits,
                misses: stats_after.misses - stats_before.misses,
                computations: stats_after.computations - stats_before.computations,
            },
        };
        info!("Feature run complete: {:?}", summary);
        Ok(summary)
    }

    /// Phase 1: one base record per rated movie in the working set
    pub fn generate_feature_base(
        &mut self,
        source: &dyn RatingSource,
    ) -> Result<usize, FeatureError> {
        let movies = source.rated_movies(&self.entity_ids)?;

        for movie in movies {
            if !self.entity_ids.contains(&movie.id) {
                debug!("Skipping movie {} outside the working set", movie.id);
                continue;
            }
            if !movie.rating.is_finite() {
                return Err(FeatureError::RatingSource(format!(
                    "movie {} has non-finite rating {}",
                    movie.id, movie.rating
                )));
            }
            info!(
                "Generating base features for {} ({})",
                movie.title, movie.rating
            );
            self.features
                .insert(movie.id, BaseRecord::new(movie.title, movie.rating));
        }

        let missing = self.entity_ids.len().saturating_sub(self.features.len());
        if missing > 0 {
            warn!("{} movies in the working set have no rating", missing);
        }
        Ok(self.features.len())
    }

    /// Phase 2: run every selected extractor through the cache and merge
    pub fn extract_features(&mut self) -> Result<(), FeatureError> {
        for descriptor in &self.selection.extractors {
            let unit = descriptor.unit();
            let key = cache_key(unit.name(), unit.version(), &self.entity_ids);
            info!("Running extractor {} (cache key {})", unit.name(), key);

            let ids = &self.entity_ids;
            let batch: ExtractionBatch = self.cache.get_or_compute(&key, || unit.extract(ids))?;

            for (id, features) in &batch {
                ensure_finite(unit.name(), *id, features)?;
            }

            let rows = batch.len();
            let dropped = merge_batch(&mut self.features, batch);
            self.dropped_rows += dropped;
            info!(
                "Extractor {} produced {} rows ({} dropped)",
                unit.name(),
                rows,
                dropped
            );
        }
        Ok(())
    }

    /// Phase 3: apply each combinator to every record, one combinator at a time
    pub fn combine_features(&mut self) -> Result<(), FeatureError> {
        for combinator in &self.selection.combinators {
            info!("Running combinator {}", combinator.name());
            for (id, record) in self.features.iter_mut() {
                combinator.combine(*id, &mut record.features)?;
                ensure_finite(combinator.name(), *id, &record.features)?;
            }
        }
        Ok(())
    }

    /// Current feature set
    pub fn features(&self) -> &FullFeatureSet {
        &self.features
    }

    /// Working set of ids
    pub fn entity_ids(&self) -> &BTreeSet<EntityId> {
        &self.entity_ids
    }
}
