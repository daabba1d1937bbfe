//! Text normalization for raw clipping lines and extracted fields.
//!
//! Kindle exports are littered with byte-order marks (one per entry on some
//! firmware), bracketed footnote markers copied along with the passage, and
//! stray whitespace. Every field the parser stores goes through [`clean`].

use std::sync::OnceLock;

use regex::Regex;

/// Zero-width no-break space, used as a byte-order mark.
const BOM: char = '\u{feff}';

/// Matches footnote-style reference markers such as `[12]`.
fn reference_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[\d+\]").expect("reference marker pattern is valid"))
}

/// Matches a period followed by a trailing reference number (`end.12`,
/// `end. 3`, `1999. 4`). A digit directly on both sides of the period is a
/// decimal like `3.14` and does not match.
fn trailing_reference() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(^|[^\d])\.\s*\d+|\.\s+\d+").expect("trailing reference pattern is valid")
    })
}

/// Normalizes an optional field. `None` passes through unchanged.
pub fn normalize(text: Option<&str>) -> Option<String> {
    text.map(clean)
}

/// Removes BOMs and `[<digits>]` markers, then trims surrounding whitespace.
///
/// Marker removal repeats until nothing matches, so input such as `[[1]2]`
/// collapses fully and `clean(clean(x)) == clean(x)` holds.
pub fn clean(text: &str) -> String {
    let mut result: String = text.chars().filter(|&c| c != BOM).collect();

    let marker = reference_marker();
    while marker.is_match(&result) {
        result = marker.replace_all(&result, "").into_owned();
    }

    result.trim().to_string()
}

/// Collapses `". <digits>"` reference numbers into a bare period.
///
/// Display-only: the stored highlight is never rewritten.
pub fn tidy_references(text: &str) -> String {
    trailing_reference().replace_all(text, "${1}.").into_owned()
}
