//! Feature Run

use crate::{PipelineConfig, PipelineError};
use extractors::default_registry;
use feature_cache::{Cache, CacheStore, FileStore};
use feature_engine::{
    EntityFilter, EntityId, FeatureAssembler, FeatureSink, JsonFileSink, RunMode, RunSummary,
};
use movie_filter::MovieFilter;
use std::collections::BTreeSet;
use std::sync::Arc;
use storage::{Repository, RATING_ID, VOTES_ID};
use tracing::info;

/// Info types the built-in units read
pub const INFO_TYPES: [i32; 2] = [RATING_ID, VOTES_ID];

/// Assemble features for `ids` from an already loaded repository
pub fn assemble<S: CacheStore>(
    ids: BTreeSet<EntityId>,
    repository: Arc<Repository>,
    mode: RunMode,
    skip_combinators: bool,
    cache: &mut Cache<S>,
    sink: &dyn FeatureSink,
) -> Result<RunSummary, PipelineError> {
    let selection = default_registry(Arc::clone(&repository))?.select(mode, skip_combinators);
    let assembler = FeatureAssembler::new(ids, selection, cache);
    let summary = assembler.run(repository.as_ref(), sink)?;
    Ok(summary)
}

/// Full feature run: split ids, database, cache directory, features file
pub async fn create_features(
    config: &PipelineConfig,
    mode: RunMode,
    skip_combinators: bool,
) -> Result<RunSummary, PipelineError> {
    info!("Starting feature run in {} mode", mode);

    let filter = MovieFilter::new(config.filter_config());
    let ids = filter.load_feature_ids()?;

    let pool = storage::connect(&config.database_url).await?;
    let repository = storage::load_repository(&pool, &ids, &INFO_TYPES).await?;
    pool.close().await;
    info!(
        "Loaded {} movies and {} info rows",
        repository.movie_count(),
        repository.info_count()
    );

    let mut cache = Cache::new(FileStore::new(&config.cache_dir));
    let sink = JsonFileSink::new(&config.features_path);

    assemble(ids, Arc::new(repository), mode, skip_combinators, &mut cache, &sink)
}
