//! Book summary command

use std::path::{Path, PathBuf};

use anyhow::Result;
use unicode_width::UnicodeWidthStr;

use kindle_highlights::summary::SUMMARY_HEADER;
use kindle_highlights::theme::current_theme;
use kindle_highlights::{Command, Config, Output, TitleSummary};

use super::{load_session, unexpected};

/// Print the title/author/year table, or write it as CSV.
pub fn handle(
    file: &Path,
    config: &Config,
    csv: bool,
    out: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let mut session = load_session(file, config, None)?;
    let theme = current_theme();

    if csv {
        let payload = match session.handle(Command::ExportSummary)? {
            Output::Export(payload) => payload,
            other => return Err(unexpected(other)),
        };
        let dir = out.unwrap_or_else(|| config.export_dir());
        let path = payload.write_to(&dir)?;
        println!(
            "{}",
            theme.success_text(&format!("Exported to {}", path.display()))
        );
        return Ok(());
    }

    let rows = match session.handle(Command::Summary)? {
        Output::Summary(rows) => rows,
        other => return Err(unexpected(other)),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("{}", theme.primary_text("No books found."));
        return Ok(());
    }

    for line in table_lines(&rows) {
        println!("{}", theme.primary_text(&line));
    }
    Ok(())
}

/// Header plus one aligned line per row.
fn table_lines(rows: &[TitleSummary]) -> Vec<String> {
    let cells: Vec<[&str; 3]> = rows
        .iter()
        .map(|r| [r.title.as_str(), r.author.as_str(), r.year_read.as_str()])
        .collect();

    let mut widths = SUMMARY_HEADER.map(|h| h.width());
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.width());
        }
    }

    std::iter::once(SUMMARY_HEADER)
        .chain(cells)
        .map(|row| {
            let [title, author, year] = row;
            format!(
                "{}{}  {}{}  {}",
                title,
                " ".repeat(widths[0] - title.width()),
                author,
                " ".repeat(widths[1] - author.width()),
                year
            )
        })
        .collect()
}
