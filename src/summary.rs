//! Title/author summary table.

use std::collections::HashSet;

use serde::Serialize;

use crate::clippings::fields::{extract_year, split_title_author};
use crate::store::RecordStore;

/// CSV header for the summary export.
pub const SUMMARY_HEADER: [&str; 3] = ["Title", "Author", "Year Read"];

/// One row per distinct book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleSummary {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Year Read")]
    pub year_read: String,
}

/// Builds the deduplicated summary, sorted by title.
///
/// Duplicates are detected on the cleaned title; the first entry in store
/// order wins. Sorting is case-sensitive and stable.
pub fn summarize(store: &RecordStore) -> Vec<TitleSummary> {
    let mut seen = HashSet::new();
    let mut rows: Vec<TitleSummary> = store
        .iter()
        .filter_map(|entry| {
            let (title, author) = split_title_author(&entry.record.title);
            if !seen.insert(title.clone()) {
                return None;
            }
            Some(TitleSummary {
                title,
                author,
                year_read: extract_year(&entry.record.added_on),
            })
        })
        .collect();

    rows.sort_by(|a, b| a.title.cmp(&b.title));
    rows
}
