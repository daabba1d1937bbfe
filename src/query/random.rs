//! Random highlight selection.

use rand::seq::SliceRandom;
use rand::Rng;

use super::QueryError;
use crate::store::{Entry, RecordStore};

/// Picks one entry uniformly from those whose title contains none of the
/// exclusion keywords.
///
/// Keyword matching is case-insensitive and OR-combined; blank keywords are
/// ignored, so an empty list excludes nothing. The returned entry keeps its
/// store index, so it stays valid for context lookup.
pub fn pick_random_excluding<'a, R: Rng + ?Sized>(
    store: &'a RecordStore,
    exclude_keywords: &[String],
    rng: &mut R,
) -> Result<&'a Entry, QueryError> {
    let keywords: Vec<String> = exclude_keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    let candidates: Vec<&Entry> = store
        .iter()
        .filter(|entry| {
            let title = entry.record.title.to_lowercase();
            !keywords.iter().any(|k| title.contains(k.as_str()))
        })
        .collect();

    candidates
        .choose(rng)
        .copied()
        .ok_or(QueryError::EmptyResult)
}
