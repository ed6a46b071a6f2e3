pub mod config;
pub mod post;
pub mod query;
pub mod selection;

// Config re-exports
pub use config::{
    BoardSettings, Config, ConfigError, DiscordSettings, LoggingSettings, Secrets, SecretsError,
    Settings, SettingsError,
};

// Domain re-exports
pub use post::{IMAGE_EXTENSIONS, Post};
pub use query::{MAX_TAGS, RatingFilter, TagQuery, UnknownRating, truncate_tags};
pub use selection::{FetchOutcome, Selection, SelectionResult, pick_random, select_image};
