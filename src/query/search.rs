//! Full-text search and title lookup.

use crate::store::{Entry, RecordStore};

/// Result of a highlight search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<T> {
    /// The term was blank; nothing was searched
    NotPerformed,
    /// Matching entries in store order (possibly none)
    Matches(Vec<T>),
}

impl<T> SearchOutcome<T> {
    /// Matches, or an empty slice when no search ran.
    pub fn matches(&self) -> &[T] {
        match self {
            SearchOutcome::NotPerformed => &[],
            SearchOutcome::Matches(found) => found,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> SearchOutcome<U> {
        match self {
            SearchOutcome::NotPerformed => SearchOutcome::NotPerformed,
            SearchOutcome::Matches(found) => SearchOutcome::Matches(found.into_iter().map(f).collect()),
        }
    }
}

/// Entries whose highlight contains `term`, ignoring case.
///
/// A blank term returns [`SearchOutcome::NotPerformed`] instead of matching
/// everything.
pub fn search<'a>(store: &'a RecordStore, term: &str) -> SearchOutcome<&'a Entry> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return SearchOutcome::NotPerformed;
    }

    SearchOutcome::Matches(
        store
            .iter()
            .filter(|entry| entry.record.highlight.to_lowercase().contains(&needle))
            .collect(),
    )
}

/// Distinct titles containing `keyword`, ignoring case, in first-seen order.
///
/// A blank keyword lists every title.
pub fn find_titles<'a>(store: &'a RecordStore, keyword: &str) -> Vec<&'a str> {
    let needle = keyword.trim().to_lowercase();
    store
        .titles()
        .into_iter()
        .filter(|title| title.to_lowercase().contains(&needle))
        .collect()
}
