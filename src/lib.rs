//! Kindle Highlights Viewer
//!
//! Parses a Kindle "My Clippings.txt" export into highlight records and
//! answers queries over them: random picks with title exclusions, context
//! lookup within a title, per-title listing, full-text search, and a
//! title/author/year summary with CSV and text exports.
//!
//! The [`session`] module is the entry point for presentation layers; the
//! CLI and the terminal viewer in this crate both drive it through
//! [`Session::handle`].

pub mod cli;
pub mod clippings;
pub mod config;
pub mod files;
pub mod normalize;
pub mod query;
pub mod session;
pub mod store;
pub mod summary;
pub mod theme;
pub mod tui;

pub use clippings::{Highlight, ParseError};
pub use config::Config;
pub use query::{QueryError, SearchOutcome};
pub use session::{
    Command, LoadStats, Output, Picked, Session, SessionError, SessionSettings, TitleCount,
};
pub use store::{Context, Entry, RecordStore};
pub use summary::{summarize, TitleSummary};
