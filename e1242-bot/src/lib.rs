pub mod board;
pub mod command;
pub mod discord;
pub mod prompt;
pub mod state;

pub use board::{BoardClient, BoardError, PostSource};
pub use command::{CommandOutcome, CommandResponder, ImageReply, RandomCommand, run_random_command};
pub use state::BotState;
