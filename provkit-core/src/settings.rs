//! Toolkit settings: TOML persistence for host entries and docs-generator
//! configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::docgen::DocgenConfig;

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors raised while loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid TOML
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No configuration directory is available on this platform
    #[error("No configuration directory available")]
    NoConfigDir,
}

/// A host the toolkit can provision, as stored in the settings file.
///
/// Credentials are deliberately not persisted; the CLI prompts for them or
/// reads them from stdin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEntry {
    /// Short name used to refer to the host
    pub name: String,
    /// Hostname or IP address
    pub host: String,
    /// SSH port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Username for authentication
    pub username: String,
}

fn default_port() -> u16 {
    22
}

/// Persistent toolkit settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Known provisioning hosts
    pub hosts: Vec<HostEntry>,
    /// Docs-generator configuration
    pub docgen: DocgenConfig,
}

impl Settings {
    /// Default settings file location (`<config dir>/provkit/config.toml`).
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NoConfigDir`] when the platform exposes no
    /// configuration directory.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("provkit").join("config.toml"))
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Loads settings from `path`, or returns defaults when the file does
    /// not exist yet.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves settings to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Looks up a host entry by name.
    #[must_use]
    pub fn host(&self, name: &str) -> Option<&HostEntry> {
        self.hosts.iter().find(|h| h.name == name)
    }
}
