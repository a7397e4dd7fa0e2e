//! Unit Registry
//!
//! Units are registered explicitly; registration order is execution order.

use crate::unit::{Combinator, ExtractorDescriptor};
use crate::FeatureError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Which extractors a run includes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Every non-oracle extractor
    #[default]
    Standard,
    /// Every extractor, oracle ones included
    Oracle,
    /// Non-oracle baseline extractors only
    Baseline,
}

impl RunMode {
    /// Whether an extractor with these flags runs in this mode
    pub fn includes(&self, oracle: bool, baseline: bool) -> bool {
        match self {
            RunMode::Oracle => true,
            RunMode::Baseline => baseline && !oracle,
            RunMode::Standard => !oracle,
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Standard => "standard",
            RunMode::Oracle => "oracle",
            RunMode::Baseline => "baseline",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Units chosen for one run, in execution order
#[derive(Default)]
pub struct Selection {
    pub(crate) extractors: Vec<ExtractorDescriptor>,
    pub(crate) combinators: Vec<Box<dyn Combinator>>,
}

impl Selection {
    /// Selected extractors
    pub fn extractors(&self) -> &[ExtractorDescriptor] {
        &self.extractors
    }

    /// Selected combinators
    pub fn combinators(&self) -> &[Box<dyn Combinator>] {
        &self.combinators
    }

    /// Names of the selected extractors
    pub fn extractor_names(&self) -> Vec<&str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }

    /// Names of the selected combinators
    pub fn combinator_names(&self) -> Vec<&str> {
        self.combinators.iter().map(|c| c.name()).collect()
    }
}

/// All known extractors and combinators
#[derive(Default)]
pub struct UnitRegistry {
    extractors: Vec<ExtractorDescriptor>,
    combinators: Vec<Box<dyn Combinator>>,
}

impl UnitRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extractor. Names must be unique among extractors.
    pub fn register_extractor(
        &mut self,
        descriptor: ExtractorDescriptor,
    ) -> Result<(), FeatureError> {
        if self.extractors.iter().any(|e| e.name() == descriptor.name()) {
            return Err(FeatureError::DuplicateUnit {
                kind: "extractor",
                name: descriptor.name().to_string(),
            });
        }
        debug!(
            "Registered extractor {} (oracle={}, baseline={})",
            descriptor.name(),
            descriptor.oracle,
            descriptor.baseline
        );
        self.extractors.push(descriptor);
        Ok(())
    }

    /// Register a combinator. Names must be unique among combinators.
    pub fn register_combinator(
        &mut self,
        combinator: impl Combinator + 'static,
    ) -> Result<(), FeatureError> {
        if self.combinators.iter().any(|c| c.name() == combinator.name()) {
            return Err(FeatureError::DuplicateUnit {
                kind: "combinator",
                name: combinator.name().to_string(),
            });
        }
        debug!("Registered combinator {}", combinator.name());
        self.combinators.push(Box::new(combinator));
        Ok(())
    }

    /// Number of registered extractors
    pub fn extractor_count(&self) -> usize {
        self.extractors.len()
    }

    /// Number of registered combinators
    pub fn combinator_count(&self) -> usize {
        self.combinators.len()
    }

    /// Pick the units for a run, keeping registration order
    pub fn select(self, mode: RunMode, skip_combinators: bool) -> Selection {
        let extractors: Vec<_> = self
            .extractors
            .into_iter()
            .filter(|e| mode.includes(e.oracle, e.baseline))
            .collect();
        let combinators = if skip_combinators {
            Vec::new()
        } else {
            self.combinators
        };

        let selection = Selection {
            extractors,
            combinators,
        };
        info!(
            "Selected {} extractors {:?} and {} combinators {:?} ({} mode)",
            selection.extractors.len(),
            selection.extractor_names(),
            selection.combinators.len(),
            selection.combinator_names(),
            mode
        );
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntityId, ExtractionBatch, FeatureMap};
    use crate::unit::Extractor;
    use std::collections::BTreeSet;

    struct Named(&'static str);

    impl Extractor for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn extract(&self, _ids: &BTreeSet<EntityId>) -> Result<ExtractionBatch, FeatureError> {
            Ok(ExtractionBatch::new())
        }
    }

    impl Combinator for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn combine(&self, _id: EntityId, _features: &mut FeatureMap) -> Result<(), FeatureError> {
            Ok(())
        }
    }

    /// One extractor per flag combination, in a fixed order
    fn registry() -> UnitRegistry {
        let mut registry = UnitRegistry::new();
        registry
            .register_extractor(ExtractorDescriptor::new(Named("plain")))
            .unwrap();
        registry
            .register_extractor(ExtractorDescriptor::new(Named("base")).baseline())
            .unwrap();
        registry
            .register_extractor(ExtractorDescriptor::new(Named("oracle")).oracle())
            .unwrap();
        registry
            .register_extractor(ExtractorDescriptor::new(Named("oracle_base")).oracle().baseline())
            .unwrap();
        registry.register_combinator(Named("ratio")).unwrap();
        registry.register_combinator(Named("summary")).unwrap();
        registry
    }

    #[test]
    fn test_oracle_mode_selects_everything() {
        let selection = registry().select(RunMode::Oracle, false);
        assert_eq!(
            selection.extractor_names(),
            vec!["plain", "base", "oracle", "oracle_base"]
        );
    }

    #[test]
    fn test_baseline_mode_selects_non_oracle_baselines() {
        let selection = registry().select(RunMode::Baseline, false);
        assert_eq!(selection.extractor_names(), vec!["base"]);
    }

    #[test]
    fn test_standard_mode_ignores_baseline_flag() {
        let selection = registry().select(RunMode::Standard, false);
        assert_eq!(selection.extractor_names(), vec!["plain", "base"]);
    }

    #[test]
    fn test_combinators_kept_in_order() {
        let selection = registry().select(RunMode::Standard, false);
        assert_eq!(selection.combinator_names(), vec!["ratio", "summary"]);
    }

    #[test]
    fn test_skip_combinators() {
        let selection = registry().select(RunMode::Oracle, true);
        assert!(selection.combinators().is_empty());
        assert_eq!(selection.extractors().len(), 4);
    }

    #[test]
    fn test_empty_selection_is_allowed() {
        let mut registry = UnitRegistry::new();
        registry
            .register_extractor(ExtractorDescriptor::new(Named("oracle")).oracle())
            .unwrap();

        let selection = registry.select(RunMode::Baseline, false);
        assert!(selection.extractors().is_empty());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut registry = registry();
        let err = registry
            .register_extractor(ExtractorDescriptor::new(Named("plain")))
            .unwrap_err();
        assert!(matches!(err, FeatureError::DuplicateUnit { kind: "extractor", .. }));

        let err = registry.register_combinator(Named("summary")).unwrap_err();
        assert!(matches!(err, FeatureError::DuplicateUnit { kind: "combinator", .. }));

        assert_eq!(registry.extractor_count(), 4);
        assert_eq!(registry.combinator_count(), 2);
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(RunMode::default(), RunMode::Standard);
        assert_eq!(RunMode::Baseline.to_string(), "baseline");
    }
}
