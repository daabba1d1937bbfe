//! Config subcommands handler

use anyhow::{bail, Result};

use kindle_highlights::theme::current_theme;
use kindle_highlights::Config;

/// Show the effective configuration as TOML.
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    let theme = current_theme();
    println!("{}", theme.primary_text(&toml_str));
    Ok(())
}

/// Print where the config file lives, whether or not it exists yet.
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Write a config file holding the default settings.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn handle_init(force: bool) -> Result<()> {
    let theme = current_theme();
    let config_path = Config::config_path()?;

    if config_path.exists() && !force {
        bail!(
            "Config file already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }

    Config::default().save_to(&config_path)?;
    println!(
        "{}",
        theme.success_text(&format!("Config written to {}", config_path.display()))
    );
    Ok(())
}
