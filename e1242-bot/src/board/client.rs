use std::time::Duration;

use e1242_core::{BoardSettings, Post, truncate_tags};
use reqwest::Url;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{BoardError, PostSource};

/// Client for the board's `posts.json` search endpoint.
#[derive(Debug, Clone)]
pub struct BoardClient {
    client: reqwest::Client,
    posts_url: Url,
    timeout: Duration,
    max_tags: usize,
}

impl BoardClient {
    pub fn new(settings: &BoardSettings) -> Result<Self, BoardError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&settings.user_agent)
                .map_err(|_| BoardError::InvalidUserAgent(settings.user_agent.clone()))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let endpoint = format!("{}/posts.json", settings.base_url.trim_end_matches('/'));
        let posts_url = Url::parse(&endpoint)
            .map_err(|_| BoardError::InvalidBaseUrl(settings.base_url.clone()))?;

        Ok(Self {
            client,
            posts_url,
            timeout: settings.timeout(),
            max_tags: settings.max_tags,
        })
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Search URL for `tags` (truncated to `max_tags`) and `limit`.
    ///
    /// Tags are joined with spaces and form-encoded, so they reach the board
    /// separated by `+`.
    pub fn posts_url(&self, tags: &[String], limit: usize) -> Url {
        let tags = truncate_tags(tags, self.max_tags);
        let mut url = self.posts_url.clone();
        url.query_pairs_mut()
            .append_pair("tags", &tags.join(" "))
            .append_pair("limit", &limit.to_string());
        url
    }

    fn parse_content_type(headers: &HeaderMap) -> String {
        headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    async fn execute_request(
        &self,
        tags: &[String],
        limit: usize,
    ) -> Result<Vec<Post>, BoardError> {
        let url = self.posts_url(tags, limit);
        debug!("Fetching posts from {}", url);

        let response = self.client.get(url).timeout(self.timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BoardError::Status(status));
        }

        // The board serves HTML error pages with a 200 when it is unhappy
        let content_type = Self::parse_content_type(response.headers());
        if !content_type.contains("application/json") {
            return Err(BoardError::UnexpectedContentType(content_type));
        }

        let bytes = response.bytes().await?;
        let payload: PostsResponse = serde_json::from_slice(&bytes)?;

        Ok(payload
            .posts
            .unwrap_or_default()
            .iter()
            .map(Post::from_value)
            .collect())
    }
}

#[async_trait::async_trait]
impl PostSource for BoardClient {
    async fn fetch(&self, tags: &[String], limit: usize) -> Result<Vec<Post>, BoardError> {
        match self.execute_request(tags, limit).await {
            Ok(posts) => {
                debug!("Fetched {} posts", posts.len());
                Ok(posts)
            }
            Err(err) => {
                warn!("Error fetching posts: {}", err);
                Err(err)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct PostsResponse {
    #[serde(default)]
    posts: Option<Vec<Value>>,
}
