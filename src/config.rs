//! Configuration loading and management
//!
//! Handles parsing of `.taskmaster.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name looked up by `Config::load_from_dir`
pub const CONFIG_FILE: &str = ".taskmaster.toml";

/// Slot holding the board unless configured otherwise
pub const DEFAULT_SLOT: &str = "taskmaster-tasks";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Persistence slot configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Notification configuration
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Where the board is persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Slot (key) name; also the file stem on disk
    #[serde(default = "default_slot")]
    pub slot: String,

    /// Data directory; the platform data dir when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

fn default_slot() -> String {
    DEFAULT_SLOT.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            slot: default_slot(),
            dir: None,
        }
    }
}

impl StorageConfig {
    /// Configured directory, else the platform data dir, else `./.taskmaster`
    pub fn resolve_dir(&self) -> PathBuf {
        if let Some(dir) = &self.dir {
            return dir.clone();
        }
        directories::ProjectDirs::from("", "", "taskmaster")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".taskmaster"))
    }
}

/// Completion notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Deliver a notification when a task enters the completed column
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Slot names become file names, so keep them to a safe alphabet.
pub fn validate_slot_name(slot: &str) -> Result<()> {
    if slot.trim().is_empty() {
        return Err(Error::InvalidConfig(
            "storage.slot cannot be empty".to_string(),
        ));
    }
    if slot.starts_with('.') {
        return Err(Error::InvalidConfig(format!(
            "storage.slot '{slot}' cannot start with '.'"
        )));
    }
    if !slot
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'))
    {
        return Err(Error::InvalidConfig(format!(
            "storage.slot '{slot}' may only contain ASCII letters, digits, '-', '_' or '.'"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from a `.taskmaster.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %config_path.display(), error = %err, "ignoring invalid config");
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        validate_slot_name(&self.storage.slot)
    }
}
