//! Feature Combinators

use crate::statistics::StatisticalFeatures;
use feature_engine::{Combinator, EntityId, FeatureError, FeatureMap, FeatureValue};

const SUMMARY_PREFIX: &str = "summary_";

/// Characters per word, from the title extractor's output
pub struct TitleDensityCombinator;

impl Combinator for TitleDensityCombinator {
    fn name(&self) -> &str {
        "title_density"
    }

    fn combine(&self, _id: EntityId, features: &mut FeatureMap) -> Result<(), FeatureError> {
        let length = features.get("title_length").and_then(FeatureValue::as_f64);
        let words = features.get("title_words").and_then(FeatureValue::as_f64);

        if let (Some(length), Some(words)) = (length, words) {
            if words > 0.0 {
                features.insert(
                    "title_chars_per_word".to_string(),
                    FeatureValue::Float(length / words),
                );
            }
        }
        Ok(())
    }
}

/// Count, mean and spread of every numeric feature of the movie
pub struct SummaryCombinator;

impl Combinator for SummaryCombinator {
    fn name(&self) -> &str {
        "summary"
    }

    fn combine(&self, _id: EntityId, features: &mut FeatureMap) -> Result<(), FeatureError> {
        let values = StatisticalFeatures::numeric_values(features, SUMMARY_PREFIX);
        let stats = StatisticalFeatures::compute(&values);

        features.insert(format!("{}count", SUMMARY_PREFIX), stats.count.into());
        features.insert(format!("{}mean", SUMMARY_PREFIX), stats.mean.into());
        features.insert(format!("{}std_dev", SUMMARY_PREFIX), stats.std_dev.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn features(pairs: &[(&str, FeatureValue)]) -> FeatureMap {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_title_density() {
        let mut map = features(&[
            ("title_length", FeatureValue::Int(12)),
            ("title_words", FeatureValue::Int(3)),
        ]);

        TitleDensityCombinator.combine(EntityId(1), &mut map).unwrap();
        assert_eq!(map["title_chars_per_word"], FeatureValue::Float(4.0));
    }

    #[test]
    fn test_title_density_needs_words() {
        let mut map = features(&[
            ("title_length", FeatureValue::Int(0)),
            ("title_words", FeatureValue::Int(0)),
        ]);

        TitleDensityCombinator.combine(EntityId(1), &mut map).unwrap();
        assert!(!map.contains_key("title_chars_per_word"));
    }

    #[test]
    fn test_summary_of_numeric_features() {
        let mut map = features(&[
            ("a", FeatureValue::Int(2)),
            ("b", FeatureValue::Float(4.0)),
            ("flag", FeatureValue::Bool(true)),
        ]);

        SummaryCombinator.combine(EntityId(1), &mut map).unwrap();

        assert_eq!(map["summary_count"], FeatureValue::Int(2));
        assert_eq!(map["summary_mean"], FeatureValue::Float(3.0));
        assert_eq!(map["summary_std_dev"], FeatureValue::Float(1.0));
    }

    #[test]
    fn test_summary_of_empty_map() {
        let mut map = FeatureMap::new();
        SummaryCombinator.combine(EntityId(1), &mut map).unwrap();
        assert_eq!(map["summary_count"], FeatureValue::Int(0));
    }

    proptest! {
        #[test]
        fn prop_summary_is_stable_when_reapplied(
            values in proptest::collection::vec(-1e6f64..1e6, 0..8)
        ) {
            let mut map: FeatureMap = values
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("f{}", i), FeatureValue::Float(*v)))
                .collect();

            SummaryCombinator.combine(EntityId(1), &mut map).unwrap();
            let once = map.clone();
            SummaryCombinator.combine(EntityId(1), &mut map).unwrap();

            prop_assert_eq!(once, map);
        }
    }
}
