//! Clippings load errors.

use std::path::PathBuf;

/// Errors that abort loading a clippings export.
///
/// Malformed entries inside an otherwise readable file are never errors;
/// the parser drops them.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Clippings file is not valid {encoding} text")]
    Encoding { encoding: &'static str },
}
