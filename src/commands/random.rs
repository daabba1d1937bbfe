//! Random highlight command

use std::path::Path;

use anyhow::Result;

use kindle_highlights::theme::current_theme;
use kindle_highlights::{Command, Config, Output};

use super::{load_session, print_entry, unexpected, wrap, wrap_width};

/// Print one random highlight outside the excluded titles, optionally
/// followed by its neighbors within the same title.
pub fn handle(file: &Path, config: &Config, context: bool, seed: Option<u64>) -> Result<()> {
    let mut session = load_session(file, config, seed)?;
    let theme = current_theme();
    let width = wrap_width(config);

    let picked = match session.handle(Command::PickRandom)? {
        Output::Picked(picked) => picked,
        other => return Err(unexpected(other)),
    };
    print_entry(&theme, &picked.entry, &picked.display_text, width);

    if !context {
        return Ok(());
    }

    let ctx = match session.handle(Command::Context { index: None })? {
        Output::Context(ctx) => ctx,
        other => return Err(unexpected(other)),
    };

    println!();
    for (label, text) in [("Above", &ctx.above), ("Below", &ctx.below)] {
        println!("{}", theme.secondary_text(&format!("{}:", label)));
        match text {
            Some(text) => println!("{}", theme.primary_text(&wrap(text, width, "  "))),
            None => println!("{}", theme.secondary_text("  (none)")),
        }
    }
    Ok(())
}
