//! Extraction and Combination Units

use crate::types::{EntityId, ExtractionBatch, FeatureMap};
use crate::FeatureError;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

/// Computes named features for a batch of movies
pub trait Extractor {
    /// Unique unit name, also the cache key prefix
    fn name(&self) -> &str;

    /// Bump when the extraction logic changes so cached results are not reused
    fn version(&self) -> u32 {
        1
    }

    /// Extract features for `ids`. The result may cover a subset or superset of `ids`.
    fn extract(&self, ids: &BTreeSet<EntityId>) -> Result<ExtractionBatch, FeatureError>;
}

/// Derives features from the ones already assembled for a movie
pub trait Combinator {
    /// Unique unit name
    fn name(&self) -> &str;

    /// Add or replace features in `features` for movie `id`
    fn combine(&self, id: EntityId, features: &mut FeatureMap) -> Result<(), FeatureError>;
}

/// An extractor together with its selection flags
pub struct ExtractorDescriptor {
    /// Uses information unavailable at prediction time
    pub oracle: bool,
    /// Member of the minimal baseline feature set
    pub baseline: bool,
    unit: Box<dyn Extractor>,
}

impl ExtractorDescriptor {
    /// Describe a standard (non-oracle, non-baseline) extractor
    pub fn new(unit: impl Extractor + 'static) -> Self {
        Self {
            oracle: false,
            baseline: false,
            unit: Box::new(unit),
        }
    }

    /// Mark as an oracle extractor
    pub fn oracle(mut self) -> Self {
        self.oracle = true;
        self
    }

    /// Mark as a baseline extractor
    pub fn baseline(mut self) -> Self {
        self.baseline = true;
        self
    }

    /// Name of the wrapped extractor
    pub fn name(&self) -> &str {
        self.unit.name()
    }

    /// The wrapped extractor
    pub fn unit(&self) -> &dyn Extractor {
        self.unit.as_ref()
    }
}

impl std::fmt::Debug for ExtractorDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorDescriptor")
            .field("name", &self.name())
            .field("oracle", &self.oracle)
            .field("baseline", &self.baseline)
            .finish()
    }
}

/// Cache key for one extractor run: `<name>-v<version>-<digest of ids>`
pub fn cache_key(name: &str, version: u32, ids: &BTreeSet<EntityId>) -> String {
    let mut hasher = Sha256::new();
    for id in ids {
        hasher.update(id.0.to_le_bytes());
    }
    let digest = format!("{:x}", hasher.finalize());
    format!("{}-v{}-{}", name, version, &digest[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl Extractor for Noop {
        fn name(&self) -> &str {
            "noop"
        }

        fn extract(&self, _ids: &BTreeSet<EntityId>) -> Result<ExtractionBatch, FeatureError> {
            Ok(ExtractionBatch::new())
        }
    }

    fn ids(raw: &[i64]) -> BTreeSet<EntityId> {
        raw.iter().copied().map(EntityId).collect()
    }

    #[test]
    fn test_descriptor_flags() {
        let plain = ExtractorDescriptor::new(Noop);
        assert!(!plain.oracle && !plain.baseline);

        let both = ExtractorDescriptor::new(Noop).oracle().baseline();
        assert!(both.oracle && both.baseline);
        assert_eq!(both.name(), "noop");
        assert_eq!(both.unit().version(), 1);
    }

    #[test]
    fn test_cache_key_format() {
        let key = cache_key("title", 2, &ids(&[1, 2]));
        assert!(key.starts_with("title-v2-"));
        assert_eq!(key.len(), "title-v2-".len() + 16);
    }

    #[test]
    fn test_cache_key_depends_on_inputs() {
        let base = cache_key("title", 1, &ids(&[1, 2]));
        assert_eq!(base, cache_key("title", 1, &ids(&[2, 1])));
        assert_ne!(base, cache_key("title", 1, &ids(&[1, 2, 3])));
        assert_ne!(base, cache_key("title", 2, &ids(&[1, 2])));
        assert_ne!(base, cache_key("votes", 1, &ids(&[1, 2])));
    }
}
