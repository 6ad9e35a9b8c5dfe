//! Where state is kept and how passes react to failures.
//!
//! Settings come from an optional TOML file:
//!
//! ```toml
//! [store]
//! path_file = "path.txt"
//! log_file = "output.txt"
//!
//! [organize]
//! on_error = "abort"   # or "skip"
//! ```
//!
//! Every key is optional. Relative store paths resolve against the working
//! directory.

use crate::directory_pass::FailurePolicy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur during configuration loading.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub store: StoreLocations,

    #[serde(default)]
    pub organize: OrganizeSettings,
}

/// Files holding the target path and the action log.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreLocations {
    #[serde(default = "default_path_file")]
    pub path_file: PathBuf,

    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_path_file() -> PathBuf {
    PathBuf::from("path.txt")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("output.txt")
}

impl Default for StoreLocations {
    fn default() -> Self {
        Self {
            path_file: default_path_file(),
            log_file: default_log_file(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrganizeSettings {
    #[serde(default)]
    pub on_error: FailurePolicy,
}

impl StoreConfig {
    /// Builds a configuration that keeps both files inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            store: StoreLocations {
                path_file: dir.join(default_path_file()),
                log_file: dir.join(default_log_file()),
            },
            organize: OrganizeSettings::default(),
        }
    }

    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.destiniirc.toml` in the current directory
    /// 3. Look for `~/.config/destinii/config.toml` in home directory
    /// 4. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but cannot be read,
    /// or if any file found is not valid TOML.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(".destiniirc.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("destinii")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }
}
