//! Field extraction rules.
//!
//! Each rule is a named function over one field so it can be tested on its
//! own. The patterns are compiled once and shared.

use std::sync::OnceLock;

use regex::Regex;

use crate::normalize::clean;

/// Prefix identifying the metadata line of a highlight entry.
pub const METADATA_PREFIX: &str = "- Your Highlight";

fn metadata_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[Ll]ocation ([\d\-]+) \| Added on (.+)").expect("metadata pattern is valid")
    })
}

fn year_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{4})\b").expect("year pattern is valid"))
}

fn trailing_author_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*)\s\(([^()]+)\)$").expect("author pattern is valid"))
}

fn parenthetical_cleanup_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\([^)]*\)|[()]").expect("cleanup pattern is valid"))
}

fn parenthetical_group_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(([^()]*)\)").expect("group pattern is valid"))
}

/// Location and timestamp pulled from a metadata line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub location: String,
    pub added_on: String,
}

/// Whether a (normalized) line is a highlight metadata line.
pub fn is_metadata_line(line: &str) -> bool {
    line.starts_with(METADATA_PREFIX)
}

/// Extracts `Location <range> | Added on <rest>` from a metadata line.
///
/// Lines that don't match yield empty fields rather than an error.
pub fn extract_metadata(line: &str) -> Metadata {
    match metadata_pattern().captures(line) {
        Some(caps) => Metadata {
            location: clean(&caps[1]),
            added_on: clean(&caps[2]),
        },
        None => Metadata::default(),
    }
}

/// First standalone four-digit run in a timestamp, or empty.
pub fn extract_year(added_on: &str) -> String {
    year_pattern()
        .captures(added_on)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

/// Splits `Title (Author)` into its parts.
///
/// When there is no trailing `(author)` the author is empty and the whole
/// title is kept. Either way the base title then has every parenthetical
/// group and stray parenthesis removed.
pub fn split_title_author(title: &str) -> (String, String) {
    let (base, author) = match trailing_author_pattern().captures(title) {
        Some(caps) => (caps[1].to_string(), caps[2].trim().to_string()),
        None => (title.to_string(), String::new()),
    };
    (strip_parentheticals(&base), author)
}

/// Removes `( ... )` groups and any leftover parenthesis characters.
pub fn strip_parentheticals(text: &str) -> String {
    parenthetical_cleanup_pattern()
        .replace_all(text, "")
        .trim()
        .to_string()
}

/// Rewrites a title so only the last parenthetical (the author) remains.
///
/// `Dune (Dune Chronicles, Book 1) (Frank Herbert)` becomes
/// `Dune (Frank Herbert)`. Titles without parentheticals are unchanged.
pub fn reconcile_title_author(raw: &str) -> String {
    let author = match parenthetical_group_pattern().captures_iter(raw).last() {
        Some(caps) => caps[1].trim().to_string(),
        None => return raw.to_string(),
    };

    let base = strip_parentheticals(raw);
    if author.is_empty() {
        base
    } else if base.is_empty() {
        format!("({})", author)
    } else {
        format!("{} ({})", base, author)
    }
}
