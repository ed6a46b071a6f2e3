use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use e1242_bot::discord::{is_auth_failure, start_discord_bot};
use e1242_bot::prompt::prompt_token;
use e1242_bot::state::BotState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first so the log level can come from settings
    let config = e1242_core::Config::load()?;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log_level().into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting e1242 Discord bot...");
    info!(
        "Board: {} (limit {}, max {} tags, timeout {}s)",
        config.board().base_url,
        config.board().limit,
        config.board().max_tags,
        config.board().timeout_seconds
    );

    let token = match config.discord_bot_token() {
        Some(token) => token.to_string(),
        None => tokio::select! {
            token = prompt_token() => token?,
            _ = tokio::signal::ctrl_c() => {
                info!("Bot stopped by user");
                return Ok(());
            }
        },
    };

    if token.is_empty() {
        info!("No token provided, exiting...");
        return Ok(());
    }

    let state = Arc::new(BotState::from_config(&config)?);

    let mut client = match start_discord_bot(&token, state).await {
        Ok(client) => client,
        Err(e) => {
            error!("Error running bot: {}", e);
            return Ok(());
        }
    };
    let shard_manager = Arc::clone(&client.shard_manager);

    tokio::select! {
        result = client.start() => match result {
            Ok(()) => info!("Discord client stopped"),
            Err(e) if is_auth_failure(&e) => error!("Invalid token provided"),
            Err(e) => error!("Error running bot: {}", e),
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Bot stopped by user");
            shard_manager.shutdown_all().await;
        }
    }

    Ok(())
}
