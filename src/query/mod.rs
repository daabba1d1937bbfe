//! Read-only queries over a [`RecordStore`](crate::store::RecordStore).
//!
//! - [`random`] - Random highlight selection with title exclusions
//! - [`search`] - Full-text search and title lookup

mod random;
mod search;

pub use random::pick_random_excluding;
pub use search::{find_titles, search, SearchOutcome};

/// Errors reported by query operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("No titles remaining after exclusions.")]
    EmptyResult,

    #[error("No highlights loaded. Load a clippings file first.")]
    NoData,

    #[error("No highlight selected. Pick a random highlight first.")]
    NothingSelected,

    #[error("No highlights found for title: {0}")]
    UnknownTitle(String),
}
