//! Full-text search command

use std::path::Path;

use anyhow::{bail, Result};

use kindle_highlights::theme::current_theme;
use kindle_highlights::{Command, Config, Output, SearchOutcome};

use super::{load_session, print_entry, unexpected, wrap_width};

/// Print highlights containing `term`, ignoring case.
pub fn handle(file: &Path, config: &Config, term: &str, json: bool) -> Result<()> {
    let mut session = load_session(file, config, None)?;

    let matches = match session.handle(Command::Search(term.to_string()))? {
        Output::Search(SearchOutcome::Matches(found)) => found,
        Output::Search(SearchOutcome::NotPerformed) => bail!("Search term is empty"),
        other => return Err(unexpected(other)),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    let theme = current_theme();
    if matches.is_empty() {
        println!(
            "{}",
            theme.primary_text(&format!("No highlights contain \"{}\".", term.trim()))
        );
        return Ok(());
    }

    let width = wrap_width(config);
    for entry in &matches {
        print_entry(&theme, entry, &entry.record.highlight, width);
        println!();
    }
    println!(
        "{}",
        theme.primary_text(&format!("{} match(es)", matches.len()))
    );
    Ok(())
}
