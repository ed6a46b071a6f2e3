//! Tag queries sent to the image board.

use std::fmt;
use std::str::FromStr;

/// Maximum number of tags the board accepts for anonymous searches.
pub const MAX_TAGS: usize = 5;

/// Rating filter selectable from the command's `filter` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingFilter {
    Safe,
    Questionable,
    Explicit,
}

impl RatingFilter {
    /// Parse a user-supplied keyword, ignoring case.
    ///
    /// Anything other than `safe`, `questionable` or `explicit` yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "safe" => Some(Self::Safe),
            "questionable" => Some(Self::Questionable),
            "explicit" => Some(Self::Explicit),
            _ => None,
        }
    }

    /// Metatag understood by the board.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Safe => "rating:s",
            Self::Questionable => "rating:q",
            Self::Explicit => "rating:e",
        }
    }
}

impl FromStr for RatingFilter {
    type Err = UnknownRating;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownRating(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rating filter '{0}'")]
pub struct UnknownRating(pub String);

/// Ordered list of tags for one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagQuery {
    tags: Vec<String>,
}

impl TagQuery {
    /// Build a query from the command's free-text `tags` and `filter` options.
    ///
    /// Tags are split on whitespace with empty tokens dropped. A recognized
    /// rating filter is appended as the last tag; an unrecognized one is
    /// ignored. No truncation happens here.
    pub fn from_input(tags: &str, filter: &str) -> Self {
        let mut query: Self = tags.split_whitespace().collect();
        if let Some(rating) = RatingFilter::parse(filter) {
            query.push(rating.tag());
        }
        query
    }

    pub fn push(&mut self, tag: impl Into<String>) {
        self.tags.push(tag.into());
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// The first `max` tags, in order.
    pub fn truncated(&self, max: usize) -> &[String] {
        truncate_tags(&self.tags, max)
    }
}

impl<S: Into<String>> FromIterator<S> for TagQuery {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for TagQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tags.join(" "))
    }
}

/// Prefix of at most `max` tags.
pub fn truncate_tags(tags: &[String], max: usize) -> &[String] {
    &tags[..tags.len().min(max)]
}
