//! Configuration file parser for ~/.config/feedsync/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! All fields use `#[serde(default)]` so any subset of keys can be given.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level application configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the SQLite database. Empty means the default location
    /// under ~/.config/feedsync/.
    pub database_path: String,

    /// Per-feed fetch budget in whole seconds.
    pub fetch_timeout_secs: u64,

    /// Byte cap for stored post content; negative disables truncation.
    pub max_description_length: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: String::new(),
            fetch_timeout_secs: 10,
            max_description_length: 300,
        }
    }
}

impl Config {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }
}
