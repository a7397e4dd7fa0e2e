//! Feature Cache
//!
//! Memoizes extraction results per unit and persists output artifacts.

mod cache;
mod file;
mod store;

pub use cache::{Cache, CacheStats};
pub use file::{load_file, save_file, to_pretty_json};
pub use store::{CacheStore, FileStore, MemoryStore};

use thiserror::Error;

/// Cache and artifact errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode cache entry '{key}': {reason}")]
    Encode { key: String, reason: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
