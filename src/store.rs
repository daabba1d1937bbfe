//! Indexed highlight storage.
//!
//! Entries keep the position they had in parse output as their index. The
//! index is the addressable key for "current highlight" and context lookup,
//! so filtering and deduplication remove entries without renumbering the
//! rest.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::clippings::Highlight;

/// A highlight together with its stable index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub index: usize,
    #[serde(flatten)]
    pub record: Highlight,
}

/// Neighbors of a highlight inside its title's run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Context {
    pub title: Option<String>,
    pub above: Option<String>,
    pub current: Option<String>,
    pub below: Option<String>,
}

/// Ordered collection of highlights, addressed by stable index.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    /// Always sorted by ascending index
    entries: Vec<Entry>,
}

impl RecordStore {
    /// Indexes records by their position.
    pub fn new(records: Vec<Highlight>) -> Self {
        let entries = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| Entry { index, record })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Looks up an entry by its index.
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries
            .binary_search_by_key(&index, |entry| entry.index)
            .ok()
            .map(|pos| &self.entries[pos])
    }

    /// Removes entries whose highlight contains `needle` (case-sensitive).
    ///
    /// Returns the number of entries removed.
    pub fn filter_out_message(&mut self, needle: &str) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|entry| !entry.record.highlight.contains(needle));
        let removed = before - self.entries.len();
        debug!(removed, needle, "filtered message entries");
        removed
    }

    /// Keeps the first entry for each `(title, location)` pair.
    ///
    /// Returns the number of entries removed.
    pub fn dedupe(&mut self) -> usize {
        let before = self.entries.len();
        let mut seen: HashSet<(String, String)> = HashSet::with_capacity(before);
        self.entries.retain(|entry| {
            seen.insert((entry.record.title.clone(), entry.record.location.clone()))
        });
        let removed = before - self.entries.len();
        debug!(removed, "removed duplicate entries");
        removed
    }

    /// Distinct titles in first-seen order.
    pub fn titles(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|entry| entry.record.title.as_str())
            .filter(|title| seen.insert(*title))
            .collect()
    }

    /// All entries of one title, in store order.
    pub fn entries_for_title<'a>(&'a self, title: &'a str) -> impl Iterator<Item = &'a Entry> {
        self.entries
            .iter()
            .filter(move |entry| entry.record.title == title)
    }

    /// The highlights immediately before and after `index` within the same
    /// title, by store order. Location values play no part.
    ///
    /// An absent index yields an all-`None` context.
    pub fn context(&self, index: usize) -> Context {
        let Some(current) = self.get(index) else {
            return Context::default();
        };

        let run: Vec<&Entry> = self.entries_for_title(&current.record.title).collect();
        let pos = run
            .iter()
            .position(|entry| entry.index == index)
            .unwrap_or_default();

        let above = pos
            .checked_sub(1)
            .and_then(|i| run.get(i))
            .map(|entry| entry.record.highlight.clone());
        let below = run.get(pos + 1).map(|entry| entry.record.highlight.clone());

        Context {
            title: Some(current.record.title.clone()),
            above,
            current: Some(current.record.highlight.clone()),
            below,
        }
    }
}

impl FromIterator<Highlight> for RecordStore {
    fn from_iter<I: IntoIterator<Item = Highlight>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
