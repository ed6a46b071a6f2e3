//! Settings configuration loaded from TOML files.
//!
//! This module handles non-sensitive configuration stored in TOML format
//! in the XDG config directory (~/.config/e1242/config.toml).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default TOML configuration file content
const DEFAULT_CONFIG_TOML: &str = r#"# e1242 configuration file
# Located at: ~/.config/e1242/config.toml
#
# This file contains non-sensitive configuration.
# The bot token is read from the DISCORD_BOT_TOKEN environment variable,
# or prompted for on startup when unset.

[board]
base_url = "https://e621.net"
user_agent = "e1242/1.0"
limit = 100
max_tags = 5
timeout_seconds = 15

[discord]
# Register the command on a single guild instead of globally
# guild_id = 123456789012345678

[logging]
level = "info"
"#;

/// Settings loaded from TOML configuration file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Image-board API configuration
    #[serde(default)]
    pub board: BoardSettings,

    /// Discord bot configuration
    #[serde(default)]
    pub discord: DiscordSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Image-board API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BoardSettings {
    /// Scheme and host of the board, without the `/posts.json` path
    #[serde(default = "default_board_base_url")]
    pub base_url: String,

    /// Identifying client header sent with every request
    #[serde(default = "default_board_user_agent")]
    pub user_agent: String,

    /// Posts requested per fetch
    #[serde(default = "default_board_limit")]
    pub limit: usize,

    /// Tags forwarded to the board; extra tags are dropped from the end
    #[serde(default = "default_board_max_tags")]
    pub max_tags: usize,

    /// Request timeout in seconds
    #[serde(default = "default_board_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl BoardSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Discord bot settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DiscordSettings {
    /// Guild to register the slash command on. Global registration when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<u64>,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions

fn default_board_base_url() -> String {
    "https://e621.net".to_string()
}

fn default_board_user_agent() -> String {
    "e1242/1.0".to_string()
}

fn default_board_limit() -> usize {
    100
}

fn default_board_max_tags() -> usize {
    5
}

fn default_board_timeout_seconds() -> u64 {
    15
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            base_url: default_board_base_url(),
            user_agent: default_board_user_agent(),
            limit: default_board_limit(),
            max_tags: default_board_max_tags(),
            timeout_seconds: default_board_timeout_seconds(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,
}

impl Settings {
    /// Load settings from the TOML configuration file.
    ///
    /// If the config file doesn't exist, creates it with default values.
    /// The file is located at `~/.config/e1242/config.toml`.
    pub fn load() -> Result<Self, SettingsError> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load settings from an explicit path, writing defaults there first if missing.
    pub fn load_from_path(config_path: &Path) -> Result<Self, SettingsError> {
        if !config_path.exists() {
            tracing::info!("Creating default configuration at {:?}", config_path);
            Self::create_default_config(config_path)?;
        }

        let content = fs::read_to_string(config_path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        Ok(settings)
    }

    /// Get the configuration file path.
    ///
    /// Uses XDG config directory: `~/.config/e1242/config.toml`
    pub fn config_path() -> Result<PathBuf, SettingsError> {
        if let Ok(override_dir) = std::env::var("E1242_CONFIG_DIR") {
            let dir = PathBuf::from(override_dir);
            return Ok(dir.join("config.toml"));
        }

        let config_dir = dirs::config_dir()
            .ok_or(SettingsError::ConfigDirNotFound)?
            .join("e1242");

        Ok(config_dir.join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, DEFAULT_CONFIG_TOML)?;

        Ok(())
    }
}
