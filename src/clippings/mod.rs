//! Parsing of Kindle `My Clippings.txt` exports.
//!
//! # Module Structure
//!
//! - [`fields`] - Named extraction rules for metadata and title fields
//! - [`parser`] - Decoding and segment assembly
//! - [`error`] - Load failures

mod error;
pub mod fields;
mod parser;

use serde::{Deserialize, Serialize};

pub use error::ParseError;
pub use parser::{decode, parse, parse_file, parse_str, SEPARATOR};

/// A single highlighted passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    /// Book title, usually with a trailing `(Author)`
    pub title: String,
    /// Location range token, e.g. `1234-1235`
    pub location: String,
    /// Timestamp text as exported
    pub added_on: String,
    /// The passage itself
    pub highlight: String,
}

impl Highlight {
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        added_on: impl Into<String>,
        highlight: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            location: location.into(),
            added_on: added_on.into(),
            highlight: highlight.into(),
        }
    }
}
