//! Title listing and per-title display

use std::path::{Path, PathBuf};

use anyhow::Result;
use unicode_width::UnicodeWidthStr;

use kindle_highlights::theme::current_theme;
use kindle_highlights::{Command, Config, Output, TitleCount};

use super::{load_session, print_entry, unexpected, wrap_width};

/// List titles matching `keyword` (all when blank) with their highlight counts.
pub fn handle_list(file: &Path, config: &Config, keyword: &str) -> Result<()> {
    let mut session = load_session(file, config, None)?;
    let theme = current_theme();

    let titles = match session.handle(Command::FindTitles(keyword.to_string()))? {
        Output::Titles(titles) => titles,
        other => return Err(unexpected(other)),
    };

    if titles.is_empty() {
        println!("{}", theme.primary_text("No titles found."));
        return Ok(());
    }

    let column = titles.iter().map(|t| t.title.width()).max().unwrap_or(0);
    for TitleCount { title, highlights } in &titles {
        // Pad by display width so wide glyphs keep the count column aligned
        let padding = " ".repeat(column - title.width());
        println!(
            "{}{}  {}",
            theme.accent_text(title),
            padding,
            theme.secondary_text(&highlights.to_string())
        );
    }

    println!();
    println!(
        "{}",
        theme.primary_text(&format!("{} title(s)", titles.len()))
    );
    Ok(())
}

/// Print every highlight of `title`, or export them to a text file.
pub fn handle_show(
    file: &Path,
    config: &Config,
    title: &str,
    export: bool,
    out: Option<PathBuf>,
) -> Result<()> {
    let mut session = load_session(file, config, None)?;
    let theme = current_theme();

    if export {
        let payload = match session.handle(Command::ExportTitle(title.to_string()))? {
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

    let entries = match session.handle(Command::ShowTitle(title.to_string()))? {
        Output::TitleHighlights { entries, .. } => entries,
        other => return Err(unexpected(other)),
    };

    let width = wrap_width(config);
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_entry(&theme, entry, &entry.record.highlight, width);
    }
    Ok(())
}
