use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serenity::async_trait;
use serenity::model::application::{CommandInteraction, Interaction};
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{error, info, warn};

use crate::command::{RandomCommand, run_random_command};
use crate::state::BotState;

use super::commands::{FILTER_OPTION, RANDOM_COMMAND, TAGS_OPTION, string_option, sync_commands};
use super::responder::{SerenityResponder, channel_allows_nsfw};

/// Discord bot handler
///
/// Holds no per-invocation state; each interaction is handled on its own.
pub struct Bot {
    state: Arc<BotState>,
}

impl Bot {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }

    async fn handle_random_command(&self, ctx: &Context, command: &CommandInteraction) {
        let invocation = RandomCommand {
            tags: string_option(command, TAGS_OPTION),
            filter: string_option(command, FILTER_OPTION),
            nsfw_allowed: channel_allows_nsfw(ctx, command.channel_id).await,
        };

        info!(
            event_kind = "command",
            "/random from {} ({}) in {}: tags={:?} filter={:?}",
            command.user.name,
            command.user.id,
            command.channel_id,
            invocation.tags,
            invocation.filter
        );

        let responder = SerenityResponder::new(ctx, command);
        let mut rng = StdRng::from_entropy();
        let outcome = run_random_command(
            self.state.board.as_ref(),
            &responder,
            &invocation,
            self.state.fetch_limit,
            &mut rng,
        )
        .await;

        info!(event_kind = "command", "/random finished: {:?}", outcome);
    }
}

#[async_trait]
impl EventHandler for Bot {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Some(command) = interaction.as_command() else {
            return;
        };

        match command.data.name.as_str() {
            RANDOM_COMMAND => self.handle_random_command(&ctx, command).await,
            other => warn!("Ignoring unknown command /{}", other),
        }
    }

    /// Bot is ready, register slash commands
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Logged in as {} (ID: {})", ready.user.name, ready.user.id);

        match sync_commands(&ctx, self.state.guild_id).await {
            Ok(synced) => info!("Synced {} commands", synced.len()),
            Err(e) => error!("Error syncing commands: {}", e),
        }
    }
}
