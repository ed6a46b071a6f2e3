//! Posts as returned by the image board's `posts.json` endpoint.
//!
//! The board's post objects carry far more than this bot uses, and their
//! shape is not guaranteed. Fields are pulled out of the raw JSON one by one
//! so that a single odd post never fails the whole response.

use serde_json::Value;

/// File extensions treated as still images, lowercase.
pub const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];

/// The parts of a board post the bot cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Post {
    pub id: Option<u64>,
    /// `file.url`; the board nulls this for posts hidden from anonymous users.
    pub file_url: Option<String>,
    /// Single-letter rating: `s`, `q` or `e`.
    pub rating: Option<String>,
}

impl Post {
    /// Extract a post from one element of the response's `posts` array.
    ///
    /// Missing or mistyped fields become `None`.
    pub fn from_value(value: &Value) -> Self {
        let file_url = value
            .get("file")
            .and_then(|file| file.get("url"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            id: value.get("id").and_then(Value::as_u64),
            file_url,
            rating: value
                .get("rating")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Whether the post's file is one of [`IMAGE_EXTENSIONS`], case-insensitively.
    pub fn is_image(&self) -> bool {
        match self.file_url.as_deref() {
            Some(url) if !url.is_empty() => {
                let url = url.to_lowercase();
                IMAGE_EXTENSIONS.iter().any(|ext| url.ends_with(ext))
            }
            _ => false,
        }
    }
}
