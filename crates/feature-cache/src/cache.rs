//! Value Cache
//!
//! `get_or_compute` runs the compute closure at most once per key for the
//! lifetime of the underlying store. Entries are postcard-encoded.

use crate::store::CacheStore;
use crate::CacheError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Cache hit/miss statistics
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the store
    pub hits: u64,
    /// Lookups that found no usable entry
    pub misses: u64,
    /// Compute closures invoked
    pub computations: u64,
}

/// Memoizing cache over a [`CacheStore`]
pub struct Cache<S> {
    store: S,
    stats: CacheStats,
}

impl<S: CacheStore> Cache<S> {
    /// Wrap a store
    pub fn new(store: S) -> Self {
        Self {
            store,
            stats: CacheStats::default(),
        }
    }

    /// Return the value stored under `key`, computing and storing it on a miss.
    ///
    /// An entry that no longer decodes is treated as a miss and replaced.
    pub fn get_or_compute<T, E, F>(&mut self, key: &str, compute: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T, E>,
        E: From<CacheError>,
    {
        if let Some(bytes) = self.store.load(key)? {
            match postcard::from_bytes::<T>(&bytes) {
                Ok(value) => {
                    self.stats.hits += 1;
                    debug!("Cache hit for {}", key);
                    return Ok(value);
                }
                Err(e) => warn!("Discarding undecodable cache entry {}: {}", key, e),
            }
        }

        self.stats.misses += 1;
        debug!("Cache miss for {}, computing", key);

        let value = compute()?;
        self.stats.computations += 1;

        let bytes = postcard::to_allocvec(&value).map_err(|e| CacheError::Encode {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        self.store.store(key, &bytes)?;

        Ok(value)
    }

    /// Current statistics
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}
