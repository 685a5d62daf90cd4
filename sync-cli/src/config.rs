//! Configuration loading for jass-cli.
//!
//! Configuration is loaded from a TOML file given with `--config`, or from
//! `config.toml` in the platform config directory when that file exists.
//! Every field has a default, so an empty file is valid.

use directories::ProjectDirs;
use jass_sync_core::{SyncConfig, DEFAULT_HUMAN_MARKER, DEFAULT_LOG_CAPACITY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration for jass-cli.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Local player settings.
    pub player: PlayerConfig,
    /// Game server settings.
    pub server: ServerConfig,
    /// Timer settings.
    pub timing: TimingConfig,
    /// Log settings.
    pub logging: LoggingConfig,
}

/// Local player settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Name sent with `start_game` (default: "Player").
    #[serde(default = "default_player_name")]
    pub name: String,
    /// Suffix the server appends to the human seat (default: "(Human)").
    #[serde(default = "default_human_marker")]
    pub human_marker: String,
}

/// Game server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address of the line-protocol endpoint (default: 127.0.0.1:5000).
    #[serde(default = "default_server_address")]
    pub address: String,
}

/// Timer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// How long a completed trick stays on the table (default: 3000).
    #[serde(default = "default_trick_clear_delay_ms")]
    pub trick_clear_delay_ms: u64,
}

/// Log settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Lines kept in the game message log (default: 20).
    #[serde(default = "default_message_log_capacity")]
    pub message_log_capacity: usize,
}

// Default value functions
fn default_player_name() -> String {
    "Player".to_string()
}

fn default_human_marker() -> String {
    DEFAULT_HUMAN_MARKER.to_string()
}

fn default_server_address() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_trick_clear_delay_ms() -> u64 {
    3000
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_message_log_capacity() -> usize {
    DEFAULT_LOG_CAPACITY
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: default_player_name(),
            human_marker: default_human_marker(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_server_address(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            trick_clear_delay_ms: default_trick_clear_delay_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            message_log_capacity: default_message_log_capacity(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load from `explicit` if given, else from the default location if a
    /// file exists there, else use defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Core settings derived from this configuration.
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig::default()
            .with_trick_clear_delay(Duration::from_millis(self.timing.trick_clear_delay_ms))
            .with_message_log_capacity(self.logging.message_log_capacity)
            .with_human_marker(self.player.human_marker.clone())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::SerializeError)
    }
}

/// Default config file location for this platform.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("ch", "jass", "jass-cli").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
    /// Failed to render configuration.
    #[error("failed to render config: {0}")]
    SerializeError(#[source] toml::ser::Error),
}
