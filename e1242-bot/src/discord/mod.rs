mod bot;
mod commands;
mod responder;

use std::sync::Arc;

use serenity::gateway::GatewayError;
use serenity::http::HttpError;
use serenity::prelude::*;
use tracing::info;

pub use bot::Bot;
pub use commands::{RANDOM_COMMAND, random_command};
pub use responder::{SerenityResponder, channel_allows_nsfw, image_embed};

/// Build the Discord client for `token`. Call `start()` on it to connect.
pub async fn start_discord_bot(
    token: &str,
    state: Arc<crate::state::BotState>,
) -> Result<Client, DiscordError> {
    if token.trim().is_empty() {
        return Err(DiscordError::InvalidToken);
    }

    info!("Starting Discord bot...");

    let intents = GatewayIntents::non_privileged();

    let client = Client::builder(token, intents)
        .event_handler(Bot::new(state))
        .await
        .map_err(|e| DiscordError::ClientError(e.to_string()))?;

    Ok(client)
}

/// Whether a client error means Discord rejected the token.
pub fn is_auth_failure(err: &serenity::Error) -> bool {
    match err {
        serenity::Error::Gateway(GatewayError::InvalidAuthentication) => true,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            response.status_code.as_u16() == 401
        }
        _ => false,
    }
}

/// Discord-related errors
#[derive(Debug, thiserror::Error)]
pub enum DiscordError {
    #[error("Failed to create Discord client: {0}")]
    ClientError(String),

    #[error("Invalid token provided")]
    InvalidToken,
}
