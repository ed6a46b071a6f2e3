//! Image-board API access.

use e1242_core::Post;

mod client;

pub use client::BoardClient;

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("invalid board base url '{0}'")]
    InvalidBaseUrl(String),
    #[error("invalid user agent '{0}'")]
    InvalidUserAgent(String),
    /// Connection failure, timeout, or an error while reading the body.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("unexpected content type '{0}'")]
    UnexpectedContentType(String),
    #[error("malformed response body: {0}")]
    Format(#[from] serde_json::Error),
}

impl BoardError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(err) if err.is_timeout())
    }
}

/// Something that can search the board for posts.
#[async_trait::async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch up to `limit` posts matching `tags`.
    ///
    /// Implementations only forward the first few tags; see
    /// [`e1242_core::MAX_TAGS`].
    async fn fetch(&self, tags: &[String], limit: usize) -> Result<Vec<Post>, BoardError>;
}
