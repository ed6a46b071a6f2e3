use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::model::application::{Command, CommandInteraction, CommandOptionType};
use serenity::model::id::GuildId;
use serenity::prelude::*;

pub const RANDOM_COMMAND: &str = "random";
pub const TAGS_OPTION: &str = "tags";
pub const FILTER_OPTION: &str = "filter";

/// Definition of the `/random` slash command.
pub fn random_command() -> CreateCommand {
    CreateCommand::new(RANDOM_COMMAND)
        .description("Fetch a random e621 image post by tags")
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, TAGS_OPTION, "Space-separated tags")
                .required(false),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                FILTER_OPTION,
                "Filter by rating: safe, questionable, explicit",
            )
            .required(false),
        )
}

/// Register the bot's commands on `guild_id`, or globally when unset.
pub async fn sync_commands(ctx: &Context, guild_id: Option<u64>) -> serenity::Result<Vec<Command>> {
    let commands = vec![random_command()];
    match guild_id {
        Some(id) => GuildId::new(id).set_commands(&ctx.http, commands).await,
        None => Command::set_global_commands(&ctx.http, commands).await,
    }
}

/// String value of a top-level option, empty when absent.
pub fn string_option(command: &CommandInteraction, name: &str) -> String {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_str())
        .unwrap_or_default()
        .to_string()
}
