//! TUI (Text User Interface) module
//!
//! Terminal-based highlight viewer built on ratatui/crossterm.

pub mod app;
pub mod ui;
pub mod viewer_app;

pub use app::{App, TuiApp};
pub use viewer_app::{Mode, ViewerApp, ViewerState};
