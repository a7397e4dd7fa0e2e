//! Movie Filter
//!
//! Loads the movie ids of each data split and exposes their union as the
//! working set of a feature run.

mod error;
mod filter;

pub use error::FilterError;
pub use filter::{FilterConfig, MovieFilter};
