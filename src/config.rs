//! Configuration file handling.
//!
//! The config lives at `<config dir>/kindle-highlights/config.toml` unless
//! `KHL_CONFIG` points elsewhere. A missing file means defaults, and every
//! field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::files::filename;
use crate::session::{SessionSettings, CLIP_LIMIT_MESSAGE, DEFAULT_EXCLUDE_KEYWORDS};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "KHL_CONFIG";

/// Directory name under the platform config dir.
const APP_DIR: &str = "kindle-highlights";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub viewer: ViewerConfig,
    pub export: ExportConfig,
}

/// Viewer and query behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Titles containing any of these are skipped by random picks
    pub exclude_keywords: Vec<String>,
    /// Highlights containing this text are dropped on load
    pub clip_limit_message: String,
    /// Column width for wrapped CLI output
    pub wrap_width: usize,
    /// Fixed random seed (reproducible picks)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Color theme: paper, classic or ocean
    pub theme: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            exclude_keywords: DEFAULT_EXCLUDE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            clip_limit_message: CLIP_LIMIT_MESSAGE.to_string(),
            wrap_width: 80,
            seed: None,
            theme: "paper".to_string(),
        }
    }
}

/// Export output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Where exports are written (current directory when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    /// Maximum length of the title part of export filenames
    pub filename_max_length: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            filename_max_length: filename::Config::default().max_length,
        }
    }
}

impl Config {
    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }
        let base = dirs::config_dir().context("Could not determine config directory")?;
        Ok(base.join(APP_DIR).join("config.toml"))
    }

    /// Loads the config from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the config from `path`, or defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Saves the config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Session settings derived from this config.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            exclude_keywords: self.viewer.exclude_keywords.clone(),
            clip_limit_message: self.viewer.clip_limit_message.clone(),
            seed: self.viewer.seed,
            filename: filename::Config::new(self.export.filename_max_length),
        }
    }

    /// Directory exports are written to.
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
