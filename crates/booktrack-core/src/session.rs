//! Session token storage.
//!
//! Stores the bearer token under the fixed key `token` in
//! `<base>/session.json` with restricted permissions (0600).
//! Tokens are never logged or displayed in full.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Storage key the bearer token lives under.
pub const TOKEN_KEY: &str = "token";

/// On-disk layout of the session file: a flat key/value map.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct SessionFile {
    #[serde(flatten)]
    entries: BTreeMap<String, String>,
}

/// Handle to the persisted session.
///
/// Cheap to clone; every read goes back to disk so that a token written by
/// one handle (e.g. the login request) is seen by every other handle.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Session store at the default location (`$BOOKTRACK_HOME/session.json`).
    pub fn open_default() -> Self {
        Self::at(paths::session_path())
    }

    /// Session store backed by a specific file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the persisted token, if any.
    ///
    /// # Errors
    /// Returns an error if the session file exists but cannot be read or parsed.
    pub fn token(&self) -> Result<Option<String>> {
        let file = self.load()?;
        Ok(file
            .entries
            .get(TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .cloned())
    }

    /// Returns the persisted token, treating an unreadable session as "no token".
    pub fn token_or_none(&self) -> Option<String> {
        match self.token() {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable session file");
                None
            }
        }
    }

    /// Persists the token.
    ///
    /// # Errors
    /// Returns an error if the session file cannot be written.
    pub fn save_token(&self, token: &str) -> Result<()> {
        let mut file = self.load().unwrap_or_default();
        file.entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.save(&file)
    }

    /// Removes the persisted token. Returns whether a token was present.
    ///
    /// # Errors
    /// Returns an error if the session file cannot be rewritten or removed.
    pub fn clear_token(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        let mut file = self.load().unwrap_or_default();
        let removed = file.entries.remove(TOKEN_KEY).is_some();
        if file.entries.is_empty() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        } else {
            self.save(&file)?;
        }
        Ok(removed)
    }

    fn load(&self) -> Result<SessionFile> {
        if !self.path.exists() {
            return Ok(SessionFile::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))
    }

    fn save(&self, file: &SessionFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(file).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut handle = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            handle
                .write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}
