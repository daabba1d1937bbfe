//! Shared fixtures for integration tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Name of the sample export in `tests/fixtures`.
pub const SAMPLE: &str = "My Clippings.txt";

/// Directory holding test fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Raw bytes of a fixture file.
pub fn load_fixture(name: &str) -> Vec<u8> {
    fs::read(fixtures_dir().join(name)).expect("fixture should exist")
}

/// Copies a fixture into a fresh temp directory.
///
/// The directory is removed when the returned `TempDir` drops.
pub fn temp_fixture(name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join(name);
    fs::copy(fixtures_dir().join(name), &path).expect("copy fixture");
    (dir, path)
}

/// Writes `content` to a file in a fresh temp directory.
pub fn temp_clippings(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join(SAMPLE);
    fs::write(&path, content).expect("write clippings");
    (dir, path)
}
