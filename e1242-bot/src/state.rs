use std::sync::Arc;

use e1242_core::Config;

use crate::board::{BoardClient, BoardError, PostSource};

/// Shared, read-only state handed to every command invocation.
pub struct BotState {
    pub board: Arc<dyn PostSource>,
    /// Posts requested per search
    pub fetch_limit: usize,
    /// Guild for command registration; global when unset
    pub guild_id: Option<u64>,
}

impl BotState {
    pub fn new(board: Arc<dyn PostSource>, fetch_limit: usize, guild_id: Option<u64>) -> Self {
        Self {
            board,
            fetch_limit,
            guild_id,
        }
    }

    /// Build the state from loaded configuration, with a live board client.
    pub fn from_config(config: &Config) -> Result<Self, BoardError> {
        let board = BoardClient::new(config.board())?;
        Ok(Self::new(
            Arc::new(board),
            config.board().limit,
            config.settings.discord.guild_id,
        ))
    }
}
