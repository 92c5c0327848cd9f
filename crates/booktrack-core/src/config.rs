//! Configuration management for BookTrack.
//!
//! Loads configuration from ${BOOKTRACK_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::view::SortKey;

/// Environment variable that overrides `api_url` for a single invocation.
pub const API_URL_ENV: &str = "BOOKTRACK_API_URL";

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for BookTrack configuration and data files.
    //!
    //! BOOKTRACK_HOME resolution order:
    //! 1. BOOKTRACK_HOME environment variable (if set)
    //! 2. ~/.config/booktrack (default)

    use std::path::PathBuf;

    /// Returns the BookTrack home directory.
    ///
    /// Checks BOOKTRACK_HOME env var first, falls back to ~/.config/booktrack.
    /// Without a resolvable home directory, uses `.booktrack` in the working directory.
    pub fn booktrack_home() -> PathBuf {
        if let Ok(home) = std::env::var("BOOKTRACK_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".booktrack"),
            |h| h.join(".config").join("booktrack"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        booktrack_home().join("config.toml")
    }

    /// Returns the path to the persisted session file.
    pub fn session_path() -> PathBuf {
        booktrack_home().join("session.json")
    }

    /// Returns the directory where the TUI writes its log files.
    pub fn logs_dir() -> PathBuf {
        booktrack_home().join("logs")
    }
}

/// "My Books" screen preferences.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CollectionConfig {
    /// Initial sort order for the collection view.
    pub default_sort: SortKey,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the REST API, e.g. `http://localhost:3000/api`.
    pub api_url: String,
    /// Default tracing filter when RUST_LOG is unset.
    pub log_level: String,
    /// Collection view preferences.
    pub collection: CollectionConfig,
}

impl Config {
    pub const DEFAULT_API_URL: &'static str = "http://localhost:3000/api";
    pub const DEFAULT_LOG_LEVEL: &'static str = "info";

    /// Loads configuration from the default path, then applies env overrides.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                self.api_url = trimmed.to_string();
            }
        }
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Saves only the `api_url` field to a specific config file path.
    ///
    /// Creates the file from the default template if it doesn't exist.
    /// Preserves existing fields and comments using toml_edit.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or written.
    pub fn save_api_url_to(path: &Path, api_url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["api_url"] = value(api_url);

        Self::write_config(path, &doc.to_string())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            log_level: Self::DEFAULT_LOG_LEVEL.to_string(),
            collection: CollectionConfig::default(),
        }
    }
}
