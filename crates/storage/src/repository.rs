//! Repository Implementation

use crate::{StorageError, RATING_ID};
use feature_engine::{EntityId, FeatureError, RatedMovie, RatingSource};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use tracing::{debug, info};

/// Movie title row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: EntityId,
    pub title: String,
}

/// Indexed movie info row (`movie_info_idx`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieInfo {
    pub movie_id: EntityId,
    pub info_type_id: i32,
    pub info: String,
}

/// In-memory snapshot of movies and their indexed info
#[derive(Debug, Default, Clone)]
pub struct Repository {
    movies: BTreeMap<EntityId, Movie>,
    /// Keyed by (info type, movie); one value per pair
    info: BTreeMap<(i32, EntityId), String>,
}

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a movie
    pub fn insert_movie(&mut self, movie: Movie) {
        self.movies.insert(movie.id, movie);
    }

    /// Insert or replace an info row
    pub fn insert_info(&mut self, row: MovieInfo) {
        self.info.insert((row.info_type_id, row.movie_id), row.info);
    }

    /// Look up a movie
    pub fn movie(&self, id: EntityId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// Raw info value of one type for a movie
    pub fn info(&self, id: EntityId, info_type_id: i32) -> Option<&str> {
        self.info.get(&(info_type_id, id)).map(String::as_str)
    }

    /// Info value parsed into `T`; `Ok(None)` when the movie has no such info
    pub fn parsed_info<T: FromStr>(
        &self,
        id: EntityId,
        info_type_id: i32,
    ) -> Result<Option<T>, StorageError> {
        match self.info(id, info_type_id) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| StorageError::InvalidInfo {
                    movie_id: id,
                    info_type_id,
                    value: raw.to_string(),
                }),
        }
    }

    /// Movies in `ids` joined with their info of one type
    pub fn movies_with_info(
        &self,
        info_type_id: i32,
        ids: &BTreeSet<EntityId>,
    ) -> Vec<(&Movie, &str)> {
        ids.iter()
            .filter_map(|id| {
                let movie = self.movies.get(id)?;
                let info = self.info(*id, info_type_id)?;
                Some((movie, info))
            })
            .collect()
    }

    /// Total movie count
    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    /// Total info row count
    pub fn info_count(&self) -> usize {
        self.info.len()
    }
}

impl RatingSource for Repository {
    fn rated_movies(&self, ids: &BTreeSet<EntityId>) -> Result<Vec<RatedMovie>, FeatureError> {
        let joined = self.movies_with_info(RATING_ID, ids);
        info!("Loaded {} rated movies out of {} requested", joined.len(), ids.len());

        joined
            .into_iter()
            .map(|(movie, raw)| -> Result<RatedMovie, FeatureError> {
                let invalid = || StorageError::InvalidInfo {
                    movie_id: movie.id,
                    info_type_id: RATING_ID,
                    value: raw.to_string(),
                };
                let rating = raw
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|r| r.is_finite())
                    .ok_or_else(invalid)?;
                debug!("Movie {} rated {}", movie.id, rating);
                Ok(RatedMovie {
                    id: movie.id,
                    title: movie.title.clone(),
                    rating,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VOTES_ID;

    fn repository() -> Repository {
        let mut repo = Repository::new();
        for (id, title) in [(1, "Heat"), (2, "Ronin"), (3, "Drive")] {
            repo.insert_movie(Movie {
                id: EntityId(id),
                title: title.to_string(),
            });
        }
        for (id, rating) in [(1, "8.3"), (3, "7.8")] {
            repo.insert_info(MovieInfo {
                movie_id: EntityId(id),
                info_type_id: RATING_ID,
                info: rating.to_string(),
            });
        }
        repo.insert_info(MovieInfo {
            movie_id: EntityId(2),
            info_type_id: VOTES_ID,
            info: "51234".to_string(),
        });
        repo
    }

    fn ids(raw: &[i64]) -> BTreeSet<EntityId> {
        raw.iter().copied().map(EntityId).collect()
    }

    #[test]
    fn test_rated_movies_inner_join() {
        let repo = repository();
        let rated = repo.rated_movies(&ids(&[1, 2, 3])).unwrap();

        assert_eq!(rated.len(), 2);
        assert_eq!(rated[0].id, EntityId(1));
        assert_eq!(rated[0].title, "Heat");
        assert!((rated[0].rating - 8.3).abs() < 1e-9);
        assert_eq!(rated[1].id, EntityId(3));
    }

    #[test]
    fn test_rated_movies_respects_working_set() {
        let repo = repository();
        let rated = repo.rated_movies(&ids(&[3, 4])).unwrap();

        assert_eq!(rated.len(), 1);
        assert_eq!(rated[0].id, EntityId(3));
    }

    #[test]
    fn test_invalid_rating_is_an_error() {
        let mut repo = repository();
        repo.insert_info(MovieInfo {
            movie_id: EntityId(2),
            info_type_id: RATING_ID,
            info: "n/a".to_string(),
        });

        let err = repo.rated_movies(&ids(&[2])).unwrap_err();
        assert!(matches!(err, FeatureError::RatingSource(_)));
    }

    #[test]
    fn test_non_finite_rating_is_an_error() {
        for raw in ["nan", "inf", "-inf", "NaN"] {
            let mut repo = repository();
            repo.insert_info(MovieInfo {
                movie_id: EntityId(2),
                info_type_id: RATING_ID,
                info: raw.to_string(),
            });

            let err = repo.rated_movies(&ids(&[1, 2])).unwrap_err();
            assert!(matches!(err, FeatureError::RatingSource(ref msg) if msg.contains(raw)));
        }
    }

    #[test]
    fn test_parsed_info() {
        let repo = repository();

        assert_eq!(repo.parsed_info::<u64>(EntityId(2), VOTES_ID).unwrap(), Some(51234));
        assert_eq!(repo.parsed_info::<u64>(EntityId(1), VOTES_ID).unwrap(), None);
        assert!(repo.parsed_info::<u64>(EntityId(1), RATING_ID).is_err());
    }

    #[test]
    fn test_movie_lookup() {
        let repo = repository();
        assert_eq!(repo.movie(EntityId(2)).map(|m| m.title.as_str()), Some("Ronin"));
        assert!(repo.movie(EntityId(9)).is_none());
        assert_eq!(repo.movie_count(), 3);
        assert_eq!(repo.info_count(), 3);
    }
}
