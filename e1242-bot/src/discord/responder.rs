use serenity::builder::{
    CreateEmbed, CreateEmbedFooter, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage,
};
use serenity::model::application::CommandInteraction;
use serenity::model::channel::{Channel, ChannelType};
use serenity::model::id::ChannelId;
use serenity::prelude::*;
use tracing::warn;

use crate::command::{CommandResponder, ImageReply};

/// Answers a slash-command interaction through serenity's HTTP client.
pub struct SerenityResponder<'a> {
    ctx: &'a Context,
    command: &'a CommandInteraction,
}

impl<'a> SerenityResponder<'a> {
    pub fn new(ctx: &'a Context, command: &'a CommandInteraction) -> Self {
        Self { ctx, command }
    }
}

pub fn image_embed(reply: &ImageReply) -> CreateEmbed {
    CreateEmbed::new()
        .title(&reply.title)
        .colour(reply.color)
        .image(&reply.image_url)
        .footer(CreateEmbedFooter::new(&reply.footer))
}

#[async_trait::async_trait]
impl CommandResponder for SerenityResponder<'_> {
    async fn refuse(&self, content: &str) -> serenity::Result<()> {
        self.command
            .create_response(
                &self.ctx.http,
                CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new()
                        .content(content)
                        .ephemeral(true),
                ),
            )
            .await
    }

    async fn acknowledge(&self) -> serenity::Result<()> {
        self.command
            .create_response(
                &self.ctx.http,
                CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new()),
            )
            .await
    }

    async fn reply_private(&self, content: &str) -> serenity::Result<()> {
        self.command
            .create_followup(
                &self.ctx.http,
                CreateInteractionResponseFollowup::new()
                    .content(content)
                    .ephemeral(true),
            )
            .await
            .map(|_| ())
    }

    async fn reply_image(&self, reply: &ImageReply) -> serenity::Result<()> {
        self.command
            .create_followup(
                &self.ctx.http,
                CreateInteractionResponseFollowup::new().embed(image_embed(reply)),
            )
            .await
            .map(|_| ())
    }
}

pub(super) fn is_thread(kind: ChannelType) -> bool {
    matches!(
        kind,
        ChannelType::PublicThread | ChannelType::PrivateThread | ChannelType::NewsThread
    )
}

/// Whether `channel` is age-restricted.
///
/// Threads follow `parent`; a thread whose parent is unknown is not. DMs are
/// never age-restricted.
pub(super) fn nsfw_allowed(channel: &Channel, parent: Option<&Channel>) -> bool {
    let Channel::Guild(channel) = channel else {
        return false;
    };

    if !is_thread(channel.kind) {
        return channel.nsfw;
    }

    matches!(parent, Some(Channel::Guild(parent)) if parent.nsfw)
}

/// Look up `channel_id` (and its parent, for threads) and apply
/// [`nsfw_allowed`]. A failed lookup counts as not age-restricted.
pub async fn channel_allows_nsfw(ctx: &Context, channel_id: ChannelId) -> bool {
    let channel = match channel_id.to_channel(ctx).await {
        Ok(channel) => channel,
        Err(e) => {
            warn!("Failed to look up channel {}: {}", channel_id, e);
            return false;
        }
    };

    let parent_id = match &channel {
        Channel::Guild(guild_channel) if is_thread(guild_channel.kind) => guild_channel.parent_id,
        _ => None,
    };

    let parent = match parent_id {
        Some(parent_id) => match parent_id.to_channel(ctx).await {
            Ok(parent) => Some(parent),
            Err(e) => {
                warn!("Failed to look up parent channel {}: {}", parent_id, e);
                None
            }
        },
        None => None,
    };

    nsfw_allowed(&channel, parent.as_ref())
}
