//! Subcommand handlers for the `khl` binary.

pub mod completions;
pub mod config;
pub mod random;
pub mod search;
pub mod summary;
pub mod titles;
pub mod view;

use std::path::Path;

use anyhow::{anyhow, Result};
use humansize::{format_size, DECIMAL};
use tracing::info;

use kindle_highlights::store::Entry;
use kindle_highlights::theme::Theme;
use kindle_highlights::{Config, Output, Session};

/// Narrowest width wrapped output is ever squeezed to.
const MIN_WRAP_WIDTH: usize = 20;

/// Builds a session from `config` and loads `file` into it.
///
/// `seed` overrides the configured seed.
pub(crate) fn load_session(file: &Path, config: &Config, seed: Option<u64>) -> Result<Session> {
    let mut settings = config.session_settings();
    if seed.is_some() {
        settings.seed = seed;
    }

    if let Ok(meta) = std::fs::metadata(file) {
        info!(
            file = %file.display(),
            size = %format_size(meta.len(), DECIMAL),
            "reading clippings"
        );
    }

    let mut session = Session::new(settings);
    session.load_path(file)?;
    Ok(session)
}

/// Error for a command answered with the wrong kind of output.
pub(crate) fn unexpected(output: Output) -> anyhow::Error {
    anyhow!("Unexpected output from session: {:?}", output)
}

/// Output width: the terminal width capped at the configured wrap width.
pub(crate) fn wrap_width(config: &Config) -> usize {
    let configured = config.viewer.wrap_width.max(MIN_WRAP_WIDTH);
    terminal_size::terminal_size()
        .map(|(w, _)| (w.0 as usize).clamp(MIN_WRAP_WIDTH, configured))
        .unwrap_or(configured)
}

/// Wraps `text` to `width`, indenting every line.
pub(crate) fn wrap(text: &str, width: usize, indent: &str) -> String {
    let options = textwrap::Options::new(width)
        .initial_indent(indent)
        .subsequent_indent(indent);
    textwrap::fill(text, options)
}

/// Prints one highlight: index and title, its metadata, then the wrapped text.
pub(crate) fn print_entry(theme: &Theme, entry: &Entry, text: &str, width: usize) {
    let record = &entry.record;
    println!(
        "{} {}",
        theme.secondary_text(&format!("[{}]", entry.index)),
        theme.accent_text(&record.title)
    );
    if !record.location.is_empty() || !record.added_on.is_empty() {
        println!(
            "{}",
            theme.secondary_text(&format!(
                "Location {} | Added on {}",
                record.location, record.added_on
            ))
        );
    }
    println!();
    println!("{}", theme.primary_text(&wrap(text, width, "  ")));
}
