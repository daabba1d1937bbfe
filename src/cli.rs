//! Command-line interface definitions.
//!
//! Lives in the library so `xtask` can render the man page from the same
//! definitions the binary parses.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[cfg(not(feature = "release"))]
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("KHL_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("KHL_BUILD_DATE"), ")");

/// Kindle Highlights Viewer - browse, search and export highlights from
/// a Kindle "My Clippings.txt" export.
#[derive(Debug, Parser)]
#[command(name = "khl", version = VERSION, about, long_about = None)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse highlights in an interactive terminal viewer
    View {
        /// Path to My Clippings.txt
        file: PathBuf,
    },

    /// Print a random highlight, skipping excluded titles
    Random {
        /// Path to My Clippings.txt
        file: PathBuf,
        /// Also print the highlights before and after it
        #[arg(short, long)]
        context: bool,
        /// Seed for a reproducible pick (overrides config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List titles, optionally filtered by a keyword
    Titles {
        /// Path to My Clippings.txt
        file: PathBuf,
        /// Case-insensitive title or author fragment
        keyword: Option<String>,
    },

    /// Show every highlight of one title
    Show {
        /// Path to My Clippings.txt
        file: PathBuf,
        /// Exact title as listed by `khl titles`
        title: String,
        /// Write the highlights to <title>_highlights.txt
        #[arg(short, long)]
        export: bool,
        /// Export directory (overrides config)
        #[arg(short, long, requires = "export")]
        out: Option<PathBuf>,
    },

    /// Search highlight text (case-insensitive substring)
    Search {
        /// Path to My Clippings.txt
        file: PathBuf,
        /// Text to look for
        term: String,
        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize books: title, author and year read
    Summary {
        /// Path to My Clippings.txt
        file: PathBuf,
        /// Write the table to kindle_books_filtered.csv
        #[arg(long)]
        csv: bool,
        /// Export directory (overrides config)
        #[arg(short, long, requires = "csv")]
        out: Option<PathBuf>,
        /// Print the table as JSON
        #[arg(long, conflicts_with = "csv")]
        json: bool,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Write a config file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
