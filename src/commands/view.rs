//! Interactive viewer command

use std::path::Path;

use anyhow::Result;

use kindle_highlights::tui::{TuiApp, ViewerApp};
use kindle_highlights::Config;

use super::load_session;

/// Load `file` and browse it in the terminal viewer.
///
/// The file is parsed before the terminal switches screens, so load errors
/// print normally.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, config: &Config) -> Result<()> {
    let session = load_session(file, config, None)?;
    let mut app = ViewerApp::new(session, config.export_dir())?;
    app.run()
}
