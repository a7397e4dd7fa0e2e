//! Statistical Summaries over Feature Values

use feature_engine::FeatureMap;

/// Statistical summary of a set of values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticalFeatures {
    /// Number of values
    pub count: usize,
    /// Mean value
    pub mean: f64,
    /// Standard deviation (population)
    pub std_dev: f64,
}

impl StatisticalFeatures {
    /// Compute statistical features from a slice of values
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let m2: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();

        Self {
            count: values.len(),
            mean,
            std_dev: (m2 / n).sqrt(),
        }
    }

    /// Numeric feature values, skipping names with the given prefix
    pub fn numeric_values(features: &FeatureMap, skip_prefix: &str) -> Vec<f64> {
        features
            .iter()
            .filter(|(name, _)| !name.starts_with(skip_prefix))
            .filter_map(|(_, value)| value.as_f64())
            .filter(|v| v.is_finite())
            .collect()
    }
}
