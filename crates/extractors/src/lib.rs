//! Feature Extractors
//!
//! Reference extraction and combination units, and the registry the
//! `feature-creator` binary runs with.

mod charset;
mod combinators;
mod statistics;
mod title;
mod votes;

pub use charset::TitleCharsetExtractor;
pub use combinators::{SummaryCombinator, TitleDensityCombinator};
pub use statistics::StatisticalFeatures;
pub use title::TitleExtractor;
pub use votes::VotesExtractor;

use feature_engine::{ExtractorDescriptor, FeatureError, UnitRegistry};
use std::sync::Arc;
use storage::Repository;

/// Registry of every built-in unit, in execution order
pub fn default_registry(repository: Arc<Repository>) -> Result<UnitRegistry, FeatureError> {
    let mut registry = UnitRegistry::new();

    registry.register_extractor(
        ExtractorDescriptor::new(TitleExtractor::new(Arc::clone(&repository))).baseline(),
    )?;
    registry.register_extractor(ExtractorDescriptor::new(TitleCharsetExtractor::new(
        Arc::clone(&repository),
    )))?;
    registry
        .register_extractor(ExtractorDescriptor::new(VotesExtractor::new(repository)).oracle())?;

    registry.register_combinator(TitleDensityCombinator)?;
    registry.register_combinator(SummaryCombinator)?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::RunMode;

    #[test]
    fn test_default_registry_modes() {
        let repo = Arc::new(Repository::new());

        let standard = default_registry(Arc::clone(&repo))
            .unwrap()
            .select(RunMode::Standard, false);
        assert_eq!(standard.extractor_names(), vec!["title", "title_charset"]);
        assert_eq!(standard.combinator_names(), vec!["title_density", "summary"]);

        let baseline = default_registry(Arc::clone(&repo))
            .unwrap()
            .select(RunMode::Baseline, false);
        assert_eq!(baseline.extractor_names(), vec!["title"]);

        let oracle = default_registry(repo).unwrap().select(RunMode::Oracle, true);
        assert_eq!(oracle.extractor_names(), vec!["title", "title_charset", "votes"]);
        assert!(oracle.combinators().is_empty());
    }
}
