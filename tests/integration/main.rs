//! Integration tests for kindle-highlights.

mod helpers;

mod cli_test;
mod export_test;
mod parse_test;
mod session_test;
