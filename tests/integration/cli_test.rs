//! Integration tests for the khl binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixtures_dir, temp_clippings, temp_fixture, SAMPLE};

/// khl with colors off and a config file that doesn't exist yet.
fn khl(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("khl").expect("binary should build");
    cmd.env("NO_COLOR", "1")
        .env("KHL_CONFIG", config_dir.join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

fn sample() -> String {
    fixtures_dir().join(SAMPLE).display().to_string()
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    khl(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("random"))
        .stdout(predicate::str::contains("summary"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_includes_package_version() {
    let dir = TempDir::new().unwrap();
    khl(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn random_with_seed_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let run = || {
        let output = khl(dir.path())
            .args(["random", &sample(), "--seed", "7"])
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout).unwrap()
    };
    let first = run();
    assert_eq!(first, run());
    assert!(!first.contains("Python Crash Course"));
}

#[test]
fn random_with_context_prints_neighbors() {
    let dir = TempDir::new().unwrap();
    khl(dir.path())
        .args(["random", &sample(), "--seed", "3", "--context"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Above:"))
        .stdout(predicate::str::contains("Below:"));
}

#[test]
fn random_fails_when_everything_is_excluded() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[viewer]\nexclude_keywords = [\"e\"]\n",
    )
    .unwrap();

    khl(dir.path())
        .args(["random", &sample()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No titles remaining after exclusions."));
}

#[test]
fn titles_lists_counts() {
    let dir = TempDir::new().unwrap();
    let output = khl(dir.path())
        .args(["titles", &sample()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let pride = stdout
        .lines()
        .find(|line| line.starts_with("Pride and Prejudice (Jane Austen)"))
        .unwrap();
    assert!(pride.ends_with("  2"), "unexpected line: {:?}", pride);
    assert!(stdout.contains("3 title(s)"));
}

#[test]
fn titles_keyword_filters() {
    let dir = TempDir::new().unwrap();
    khl(dir.path())
        .args(["titles", &sample(), "HERBERT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune"))
        .stdout(predicate::str::contains("Pride").not());
}

#[test]
fn show_prints_title_highlights() {
    let dir = TempDir::new().unwrap();
    khl(dir.path())
        .args(["show", &sample(), "Pride and Prejudice (Jane Austen)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[2]"))
        .stdout(predicate::str::contains("[6]"))
        .stdout(predicate::str::contains("clipping limit").not());
}

#[test]
fn show_unknown_title_fails() {
    let dir = TempDir::new().unwrap();
    khl(dir.path())
        .args(["show", &sample(), "Missing Book"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing Book"));
}

#[test]
fn search_json_returns_matches() {
    let dir = TempDir::new().unwrap();
    let output = khl(dir.path())
        .args(["search", &sample(), "fear", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let matches: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let matches = matches.as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["index"], 0);
    assert_eq!(matches[0]["location"], "1012-1013");
}

#[test]
fn search_blank_term_fails() {
    let dir = TempDir::new().unwrap();
    khl(dir.path())
        .args(["search", &sample(), "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Search term is empty"));
}

#[test]
fn search_without_matches_says_so() {
    let dir = TempDir::new().unwrap();
    khl(dir.path())
        .args(["search", &sample(), "zeppelin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No highlights contain"));
}

#[test]
fn summary_prints_sorted_table() {
    let dir = TempDir::new().unwrap();
    let output = khl(dir.path())
        .args(["summary", &sample()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let firsts: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(firsts, ["Title", "Dune", "Pride", "Python"]);
}

#[test]
fn summary_json_uses_column_names() {
    let dir = TempDir::new().unwrap();
    let output = khl(dir.path())
        .args(["summary", &sample(), "--json"])
        .output()
        .unwrap();
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["Title"], "Dune");
    assert_eq!(rows[0]["Author"], "Frank Herbert");
    assert_eq!(rows[0]["Year Read"], "2020");
}

// ============================================================================
// Exports
// ============================================================================

#[test]
fn summary_csv_writes_to_out_dir() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    khl(dir.path())
        .args(["summary", &sample(), "--csv", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    let csv = fs::read_to_string(out.join("kindle_books_filtered.csv")).unwrap();
    assert!(csv.starts_with("Title,Author,Year Read\n"));
}

#[test]
fn show_export_uses_config_directory() {
    let dir = TempDir::new().unwrap();
    let exports = dir.path().join("exports");
    fs::write(
        dir.path().join("config.toml"),
        format!("[export]\ndirectory = {:?}\n", exports.display().to_string()),
    )
    .unwrap();

    khl(dir.path())
        .args(["show", &sample(), "Pride and Prejudice (Jane Austen)", "--export"])
        .assert()
        .success();

    let text =
        fs::read_to_string(exports.join("Pride_and_Prejudice_Jane_Austen_highlights.txt")).unwrap();
    assert!(text.starts_with("[2] It is a truth"));
}

// ============================================================================
// Errors and config
// ============================================================================

#[test]
fn missing_file_fails_with_path() {
    let dir = TempDir::new().unwrap();
    khl(dir.path())
        .args(["titles", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.txt"));
}

#[test]
fn copied_fixture_loads() {
    let (_dir, path) = temp_fixture(SAMPLE);
    let config = TempDir::new().unwrap();
    khl(config.path())
        .arg("titles")
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn empty_file_has_no_titles() {
    let (_dir, path) = temp_clippings("");
    let config = TempDir::new().unwrap();
    khl(config.path())
        .arg("titles")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No titles found."));
}

#[test]
fn config_init_then_show() {
    let dir = TempDir::new().unwrap();
    khl(dir.path())
        .args(["config", "init"])
        .assert()
        .success();
    assert!(dir.path().join("config.toml").exists());

    khl(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    khl(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exclude_keywords"));
}

#[test]
fn config_path_honors_env() {
    let dir = TempDir::new().unwrap();
    khl(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn broken_config_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "[viewer\n").unwrap();
    khl(dir.path())
        .args(["titles", &sample()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn completions_generate_for_bash() {
    let dir = TempDir::new().unwrap();
    khl(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("khl"));
}
