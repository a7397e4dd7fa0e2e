//! Title Character-Set Features

use feature_engine::{EntityId, ExtractionBatch, Extractor, FeatureError, FeatureMap};
use std::collections::BTreeSet;
use std::sync::Arc;
use storage::Repository;

/// Share of non-ASCII and uppercase letters, punctuation count
pub struct TitleCharsetExtractor {
    repository: Arc<Repository>,
}

impl TitleCharsetExtractor {
    pub fn new(repository: Arc<Repository>) -> Self {
        Self { repository }
    }

    pub fn charset_features(title: &str) -> FeatureMap {
        let total = title.chars().count();
        let letters: Vec<char> = title.chars().filter(|c| c.is_alphabetic()).collect();

        let ratio = |count: usize, of: usize| if of == 0 { 0.0 } else { count as f64 / of as f64 };

        let mut features = FeatureMap::new();
        features.insert(
            "title_non_ascii_ratio".to_string(),
            ratio(title.chars().filter(|c| !c.is_ascii()).count(), total).into(),
        );
        features.insert(
            "title_uppercase_ratio".to_string(),
            ratio(letters.iter().filter(|c| c.is_uppercase()).count(), letters.len()).into(),
        );
        features.insert(
            "title_punctuation".to_string(),
            title.chars().filter(|c| c.is_ascii_punctuation()).count().into(),
        );
        features
    }
}

impl Extractor for TitleCharsetExtractor {
    fn name(&self) -> &str {
        "title_charset"
    }

    fn extract(&self, ids: &BTreeSet<EntityId>) -> Result<ExtractionBatch, FeatureError> {
        Ok(ids
            .iter()
            .filter_map(|id| {
                let movie = self.repository.movie(*id)?;
                Some((*id, Self::charset_features(&movie.title)))
            })
            .collect())
    }
}
