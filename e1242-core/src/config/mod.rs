//! Configuration management for e1242.
//!
//! This module provides a unified configuration system that separates
//! secrets (from environment variables) from settings (from TOML files).
//!
//! # Configuration Sources
//!
//! ## Secrets (Environment Variables)
//! - `DISCORD_BOT_TOKEN` - Discord bot token
//!
//! ## Settings (TOML File)
//! Located at `~/.config/e1242/config.toml`:
//! ```toml
//! [board]
//! base_url = "https://e621.net"
//! user_agent = "e1242/1.0"
//! limit = 100
//! max_tags = 5
//! timeout_seconds = 15
//!
//! [discord]
//! # guild_id = 123456789012345678
//!
//! [logging]
//! level = "info"
//! ```

mod secrets;
mod settings;

pub use secrets::{DISCORD_BOT_TOKEN_ENV, Secrets, SecretsError};
pub use settings::{BoardSettings, DiscordSettings, LoggingSettings, Settings, SettingsError};

/// Combined configuration containing both secrets and settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secrets loaded from environment variables
    pub secrets: Secrets,
    /// Settings loaded from TOML configuration file
    pub settings: Settings,
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Secrets error: {0}")]
    Secrets(#[from] SecretsError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Board limit must be at least 1")]
    ZeroLimit,

    #[error("Board max_tags must be at least 1")]
    ZeroMaxTags,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// This loads:
    /// 1. Secrets from environment variables
    /// 2. Settings from TOML file (creating defaults if needed)
    ///
    /// A missing bot token is not an error here; the caller decides
    /// whether to prompt for one.
    pub fn load() -> Result<Self, ConfigError> {
        let secrets = Secrets::from_env()?;
        let settings = Settings::load()?;
        Self::validated(secrets, settings)
    }

    fn validated(secrets: Secrets, settings: Settings) -> Result<Self, ConfigError> {
        if settings.board.limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }
        if settings.board.max_tags == 0 {
            return Err(ConfigError::ZeroMaxTags);
        }
        Ok(Self { secrets, settings })
    }

    /// Get the Discord bot token (if configured).
    pub fn discord_bot_token(&self) -> Option<&str> {
        self.secrets.discord_bot_token.as_deref()
    }

    /// Get the image-board settings.
    pub fn board(&self) -> &BoardSettings {
        &self.settings.board
    }

    /// Get the configured log level.
    pub fn log_level(&self) -> &str {
        &self.settings.logging.level
    }
}

#[cfg(test)]
mod tests {
    use super::secrets::tests::{ENV_MUTEX, clear_env};
    use super::*;
    use std::env;

    #[test]
    fn test_validated_rejects_zero_limit() {
        let mut settings = Settings::default();
        settings.board.limit = 0;

        let result = Config::validated(Secrets::default(), settings);
        assert!(matches!(result, Err(ConfigError::ZeroLimit)));
    }

    #[test]
    fn test_validated_rejects_zero_max_tags() {
        let mut settings = Settings::default();
        settings.board.max_tags = 0;

        let result = Config::validated(Secrets::default(), settings);
        assert!(matches!(result, Err(ConfigError::ZeroMaxTags)));
    }

    #[test]
    fn test_token_accessor() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();
        unsafe { env::set_var(DISCORD_BOT_TOKEN_ENV, "token") }

        let secrets = Secrets::from_env_inner().unwrap();
        let config = Config::validated(secrets, Settings::default()).unwrap();
        assert_eq!(config.discord_bot_token(), Some("token"));
        assert_eq!(config.board().limit, 100);
        assert_eq!(config.log_level(), "info");
        clear_env();
    }

    #[test]
    fn test_missing_token_still_loads() {
        let config = Config::validated(Secrets::default(), Settings::default()).unwrap();
        assert!(config.discord_bot_token().is_none());
    }
}
