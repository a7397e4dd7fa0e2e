//! Storage Layer
//!
//! Movie titles and indexed movie info (ratings, votes) loaded from an
//! IMDb-style SQLite database into an in-memory repository.

mod repository;
mod sqlite;

pub use repository::{Movie, MovieInfo, Repository};
pub use sqlite::{connect, load_repository};

use feature_engine::{EntityId, FeatureError};
use thiserror::Error;

/// `info_type_id` of the vote count
pub const VOTES_ID: i32 = 100;
/// `info_type_id` of the average rating
pub const RATING_ID: i32 = 101;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Invalid info value '{value}' (type {info_type_id}) for movie {movie_id}")]
    InvalidInfo {
        movie_id: EntityId,
        info_type_id: i32,
        value: String,
    },
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::DatabaseError(err.to_string())
    }
}

impl From<StorageError> for FeatureError {
    fn from(err: StorageError) -> Self {
        FeatureError::RatingSource(err.to_string())
    }
}
