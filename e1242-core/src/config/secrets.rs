//! Secrets configuration loaded from environment variables only.
//!
//! The bot token must never be written to the settings file. It is read from
//! the environment (or a development `.env`), and `main` falls back to an
//! interactive prompt when it is absent.

use std::env;

/// Environment variable holding the Discord bot token.
pub const DISCORD_BOT_TOKEN_ENV: &str = "DISCORD_BOT_TOKEN";

/// Secrets loaded exclusively from environment variables.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    /// Discord bot token (env: DISCORD_BOT_TOKEN)
    pub discord_bot_token: Option<String>,
}

/// Errors that can occur when loading secrets
#[derive(Debug, thiserror::Error)]
pub enum SecretsError {
    #[error("Secret {0} is not valid unicode")]
    NotUnicode(&'static str),
}

impl Secrets {
    /// Load secrets from environment variables.
    ///
    /// This function also loads .env file if present (for development),
    /// but production should rely on actual environment variables.
    pub fn from_env() -> Result<Self, SecretsError> {
        let _ = dotenvy::dotenv();

        Self::from_env_inner()
    }

    /// Internal method to load from environment without loading .env
    pub(crate) fn from_env_inner() -> Result<Self, SecretsError> {
        Ok(Self {
            discord_bot_token: read_secret(DISCORD_BOT_TOKEN_ENV)?,
        })
    }
}

/// Blank values count as unset.
fn read_secret(name: &'static str) -> Result<Option<String>, SecretsError> {
    match env::var(name) {
        Ok(value) => {
            let value = value.trim();
            if value.is_empty() {
                Ok(None)
            } else {
                Ok(Some(value.to_string()))
            }
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(SecretsError::NotUnicode(name)),
    }
}
