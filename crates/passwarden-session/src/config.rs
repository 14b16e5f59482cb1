//! Client configuration, stored as plain JSON next to the app data.
//!
//! Holds nothing secret: logging and credential-form limits only. Loaded
//! before the vault is opened so logging can start immediately.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::forms::{DEFAULT_MAX_LOGIN_PASSWORD_LENGTH, DEFAULT_MIN_MASTER_PASSWORD_LENGTH};

/// Session controller configuration.
///
/// Persisted to `{data_dir}/client.json`. Every field has a default, so a
/// partial file loads with the missing fields filled in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Write logs to a daily rolling file instead of stderr.
    #[serde(default)]
    pub log_to_file: bool,

    /// Directory for log files. Defaults to `{data_dir}/logs`.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Shortest accepted new master password.
    #[serde(default = "default_min_master_password_length")]
    pub min_master_password_length: usize,

    /// Longest accepted login attempt.
    #[serde(default = "default_max_login_password_length")]
    pub max_login_password_length: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_to_file: false,
            log_dir: None,
            min_master_password_length: default_min_master_password_length(),
            max_login_password_length: default_max_login_password_length(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}
const fn default_min_master_password_length() -> usize {
    DEFAULT_MIN_MASTER_PASSWORD_LENGTH
}
const fn default_max_login_password_length() -> usize {
    DEFAULT_MAX_LOGIN_PASSWORD_LENGTH
}

// ── File I/O ───────────────────────────────────────────────────────

const CONFIG_FILE: &str = "client.json";

impl ClientConfig {
    /// Load configuration from `{data_dir}/client.json`.
    ///
    /// Returns [`Default::default()`] when the file is missing or holds
    /// invalid JSON.
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(CONFIG_FILE);
        fs::read_to_string(&path).map_or_else(
            |_| Self::default(),
            |contents| serde_json::from_str(&contents).unwrap_or_default(),
        )
    }

    /// Persist configuration to `{data_dir}/client.json`.
    ///
    /// Written to a temporary file first and renamed into place.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the directory does not exist or the
    /// file system rejects the write/rename.
    pub fn save(&self, data_dir: &Path) -> std::io::Result<()> {
        let path = data_dir.join(CONFIG_FILE);
        let tmp = data_dir.join(".client.json.tmp");

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(&tmp, &json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp, &path)?;

        Ok(())
    }

    /// Log directory, falling back to `{data_dir}/logs`.
    #[must_use]
    pub fn resolved_log_dir(&self, data_dir: &Path) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| data_dir.join("logs"))
    }
}

// ── Tests ──────────────────────────────────────────────────────────
