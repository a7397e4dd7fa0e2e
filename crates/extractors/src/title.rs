//! Title Shape Features

use feature_engine::{EntityId, ExtractionBatch, Extractor, FeatureError, FeatureMap};
use std::collections::BTreeSet;
use std::sync::Arc;
use storage::Repository;
use tracing::debug;

const ROMAN_SEQUELS: [&str; 9] = ["II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];

/// Length, word count and sequel/subtitle markers of the title
pub struct TitleExtractor {
    repository: Arc<Repository>,
}

impl TitleExtractor {
    pub fn new(repository: Arc<Repository>) -> Self {
        Self { repository }
    }

    /// Features of a single title
    pub fn title_features(title: &str) -> FeatureMap {
        let words: Vec<&str> = title.split_whitespace().collect();

        let mut features = FeatureMap::new();
        features.insert("title_length".to_string(), title.chars().count().into());
        features.insert("title_words".to_string(), words.len().into());
        features.insert(
            "title_has_digits".to_string(),
            title.chars().any(|c| c.is_ascii_digit()).into(),
        );
        features.insert("title_is_sequel".to_string(), is_sequel(&words).into());
        features.insert("title_has_subtitle".to_string(), title.contains(':').into());
        features
    }
}

/// Last word is a small number or roman numeral, or the title names a part
fn is_sequel(words: &[&str]) -> bool {
    let Some(last) = words.last() else {
        return false;
    };
    let last = last.trim_end_matches(|c: char| c.is_ascii_punctuation());

    let numbered = matches!(last.parse::<u32>(), Ok(n) if (2..=9).contains(&n));
    let roman = ROMAN_SEQUELS.contains(&last);
    let part = words.iter().any(|w| w.eq_ignore_ascii_case("part"));

    numbered || roman || part
}

impl Extractor for TitleExtractor {
    fn name(&self) -> &str {
        "title"
    }

    fn extract(&self, ids: &BTreeSet<EntityId>) -> Result<ExtractionBatch, FeatureError> {
        let mut batch = ExtractionBatch::new();
        for id in ids {
            match self.repository.movie(*id) {
                Some(movie) => {
                    batch.insert(*id, Self::title_features(&movie.title));
                }
                None => debug!("No title for movie {}", id),
            }
        }
        Ok(batch)
    }
}
