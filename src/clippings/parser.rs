//! Clippings decoding and segment assembly.
//!
//! A clippings export is a sequence of segments separated by `==========`
//! lines. Each well-formed segment reads: title line, metadata line, one or
//! more body lines. Anything else is dropped without failing the parse,
//! since real exports routinely contain bookmarks, notes, and truncated
//! trailing entries.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::fields::{extract_metadata, is_metadata_line};
use super::{Highlight, ParseError};
use crate::normalize::clean;

/// Separator line between entries.
pub const SEPARATOR: &str = "==========";

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Reads and parses a clippings file.
pub fn parse_file(path: &Path) -> Result<Vec<Highlight>, ParseError> {
    let bytes = fs::read(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&bytes)
}

/// Decodes raw export bytes and parses them.
pub fn parse(bytes: &[u8]) -> Result<Vec<Highlight>, ParseError> {
    let text = decode(bytes)?;
    Ok(parse_str(&text))
}

/// Decodes bytes as text, honoring a leading byte-order mark.
///
/// UTF-8 and UTF-16 (either endianness) BOMs are recognized; without a BOM
/// the input must be UTF-8.
pub fn decode(bytes: &[u8]) -> Result<String, ParseError> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return decode_utf8(rest);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        return decode_utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        return decode_utf16(rest, u16::from_be_bytes);
    }
    decode_utf8(bytes)
}

fn decode_utf8(bytes: &[u8]) -> Result<String, ParseError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| ParseError::Encoding { encoding: "UTF-8" })
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String, ParseError> {
    if bytes.len() % 2 != 0 {
        return Err(ParseError::Encoding { encoding: "UTF-16" });
    }
    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|_| ParseError::Encoding { encoding: "UTF-16" })
}

/// Parses already-decoded clippings text. Never fails.
pub fn parse_str(text: &str) -> Vec<Highlight> {
    let mut highlights = Vec::new();
    let mut segment = Segment::default();
    let mut segments_seen = 0usize;

    for line in text.lines().map(clean).filter(|line| !line.is_empty()) {
        if line == SEPARATOR {
            segments_seen += 1;
            if let Some(highlight) = std::mem::take(&mut segment).finish() {
                highlights.push(highlight);
            }
            continue;
        }
        segment.push(line);
    }

    // Trailing entry without a closing separator
    if !segment.is_empty() {
        segments_seen += 1;
        if let Some(highlight) = segment.finish() {
            highlights.push(highlight);
        }
    }

    debug!(
        segments = segments_seen,
        kept = highlights.len(),
        dropped = segments_seen.saturating_sub(highlights.len()),
        "parsed clippings"
    );

    highlights
}

/// Lines collected for one entry.
#[derive(Debug, Default)]
struct Segment {
    title: Option<String>,
    metadata: Option<String>,
    body: Vec<String>,
    /// Set when the segment opened with a metadata line (no title)
    headless: bool,
}

impl Segment {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.metadata.is_none() && self.body.is_empty() && !self.headless
    }

    fn push(&mut self, line: String) {
        if self.headless {
            return;
        }
        if self.title.is_none() {
            if is_metadata_line(&line) {
                self.headless = true;
            } else {
                self.title = Some(line);
            }
        } else if self.metadata.is_none() {
            // Notes and bookmarks carry other prefixes and never become metadata
            if is_metadata_line(&line) {
                self.metadata = Some(line);
            }
        } else {
            self.body.push(line);
        }
    }

    /// Builds the highlight, or `None` for an incomplete segment.
    fn finish(self) -> Option<Highlight> {
        let title = self.title?;
        let metadata = self.metadata?;
        if self.body.is_empty() {
            return None;
        }

        let fields = extract_metadata(&metadata);
        if fields.location.is_empty() {
            warn!(line = %metadata, "metadata without location, keeping highlight");
        }
        Some(Highlight {
            title: clean(&title),
            location: fields.location,
            added_on: fields.added_on,
            highlight: clean(&self.body.join(" ")),
        })
    }
}
