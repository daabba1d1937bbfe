//! `khl` - Kindle Highlights Viewer

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kindle_highlights::cli::{Cli, Commands, ConfigCommands};
use kindle_highlights::theme::{current_theme, init_theme};
use kindle_highlights::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let theme = current_theme();
            eprintln!("{}", theme.error_text(&format!("Error: {:#}", e)));
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr. The viewer owns the screen, so it only lets errors through.
fn init_logging(cli: &Cli) {
    let level = match (&cli.command, cli.verbose) {
        (Commands::View { .. }, _) => "error",
        (_, 0) => "warn",
        (_, 1) => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        // Config subcommands must work even when the file is broken
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Init { force } => commands::config::handle_init(force),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
        Commands::View { file } => commands::view::handle(&file, &load_config()?),
        Commands::Random {
            file,
            context,
            seed,
        } => commands::random::handle(&file, &load_config()?, context, seed),
        Commands::Titles { file, keyword } => {
            commands::titles::handle_list(&file, &load_config()?, keyword.as_deref().unwrap_or(""))
        }
        Commands::Show {
            file,
            title,
            export,
            out,
        } => commands::titles::handle_show(&file, &load_config()?, &title, export, out),
        Commands::Search { file, term, json } => {
            commands::search::handle(&file, &load_config()?, &term, json)
        }
        Commands::Summary {
            file,
            csv,
            out,
            json,
        } => commands::summary::handle(&file, &load_config()?, csv, out, json),
    }
}

/// Loads the config and applies its theme.
fn load_config() -> Result<Config> {
    let config = Config::load()?;
    init_theme(&config.viewer.theme);
    Ok(config)
}
