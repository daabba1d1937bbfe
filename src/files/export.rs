//! Export payloads: per-title highlight text and the summary CSV.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::filename::{self, FilenameError, SUMMARY_EXPORT_FILENAME};
use crate::store::Entry;
use crate::summary::{TitleSummary, SUMMARY_HEADER};

/// Width of the hyphen rule written after each highlight.
pub const RULE_WIDTH: usize = 40;

/// Errors that can occur while building or writing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to build CSV")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8")]
    CsvEncoding,

    #[error(transparent)]
    Filename(#[from] FilenameError),

    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A named export ready to be saved or offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub filename: String,
    pub contents: String,
}

impl ExportPayload {
    /// Writes the payload into `dir`, creating the directory if needed.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.filename);
        let write_err = |source| ExportError::Write {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(dir).map_err(write_err)?;
        fs::write(&path, &self.contents).map_err(write_err)?;
        info!(path = %path.display(), bytes = self.contents.len(), "wrote export");
        Ok(path)
    }
}

/// Renders a title's highlights as `[index] text` lines, each followed by a
/// rule of hyphens.
pub fn title_text<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!("[{}] {}\n{}\n", entry.index, entry.record.highlight, rule));
    }
    out
}

/// Builds the per-title export.
pub fn title_export<'a>(
    title: &str,
    entries: impl IntoIterator<Item = &'a Entry>,
    config: &filename::Config,
) -> Result<ExportPayload, ExportError> {
    Ok(ExportPayload {
        filename: filename::title_export_filename(title, config)?,
        contents: title_text(entries),
    })
}

/// Renders the summary table as CSV with a header row.
pub fn summary_csv(rows: &[TitleSummary]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(SUMMARY_HEADER)?;
    for row in rows {
        writer.write_record([&row.title, &row.author, &row.year_read])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|_| ExportError::CsvEncoding)
}

/// Builds the summary CSV export.
pub fn summary_export(rows: &[TitleSummary]) -> Result<ExportPayload, ExportError> {
    Ok(ExportPayload {
        filename: SUMMARY_EXPORT_FILENAME.to_string(),
        contents: summary_csv(rows)?,
    })
}
