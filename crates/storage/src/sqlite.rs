//! SQLite Loader
//!
//! Reads the `title` and `movie_info_idx` tables of an IMDb-style database.

use crate::repository::{Movie, MovieInfo, Repository};
use crate::StorageError;
use feature_engine::EntityId;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Open a connection pool to the movie database
pub async fn connect(database_url: &str) -> Result<SqlitePool, StorageError> {
    info!("Connecting to movie database {}", database_url);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Load movies in `ids` and their info rows of the given types
pub async fn load_repository(
    pool: &SqlitePool,
    ids: &BTreeSet<EntityId>,
    info_types: &[i32],
) -> Result<Repository, StorageError> {
    let mut repo = Repository::new();

    let titles: Vec<(i64, String)> = sqlx::query_as("SELECT id, title FROM title")
        .fetch_all(pool)
        .await?;
    for (id, title) in titles {
        let id = EntityId(id);
        if ids.contains(&id) {
            repo.insert_movie(Movie { id, title });
        }
    }
    debug!("Loaded {} titles", repo.movie_count());

    for &info_type_id in info_types {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT movie_id, info FROM movie_info_idx WHERE info_type_id = ?")
                .bind(info_type_id)
                .fetch_all(pool)
                .await?;

        let mut kept = 0;
        for (movie_id, info) in rows {
            let movie_id = EntityId(movie_id);
            if ids.contains(&movie_id) {
                repo.insert_info(MovieInfo {
                    movie_id,
                    info_type_id,
                    info,
                });
                kept += 1;
            }
        }
        debug!("Loaded {} info rows of type {}", kept, info_type_id);
    }

    info!(
        "Repository ready: {} movies, {} info rows",
        repo.movie_count(),
        repo.info_count()
    );
    Ok(repo)
}
