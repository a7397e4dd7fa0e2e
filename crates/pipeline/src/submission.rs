//! Submission Export
//!
//! Selects the records of one split from the features file.

use crate::{PipelineConfig, PipelineError};
use feature_cache::{load_file, save_file};
use feature_engine::{EntityId, FullFeatureSet};
use movie_filter::MovieFilter;
use std::collections::BTreeSet;
use tracing::info;

/// Records of `ids`; every id must be present in `features`
pub fn select_submission(
    features: &FullFeatureSet,
    ids: &BTreeSet<EntityId>,
) -> Result<FullFeatureSet, PipelineError> {
    ids.iter()
        .map(|id| {
            features
                .get(id)
                .map(|record| (*id, record.clone()))
                .ok_or(PipelineError::MissingFeatures(*id))
        })
        .collect()
}

/// Write the submission split's records to the submission file
pub fn export_submission(config: &PipelineConfig) -> Result<usize, PipelineError> {
    let features: FullFeatureSet = load_file(&config.features_path)?;
    info!("Loaded {} feature records", features.len());

    let filter = MovieFilter::new(config.filter_config());
    let ids = filter.load_split(&config.submission_split)?;

    let submission = select_submission(&features, &ids)?;
    save_file(&config.submission_path, &submission)?;
    info!(
        "Exported {} records of split '{}'",
        submission.len(),
        config.submission_split
    );
    Ok(submission.len())
}
