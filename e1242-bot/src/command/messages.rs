use e1242_core::SelectionResult;

pub const NSFW_ONLY: &str = "This command can only be used in NSFW channels!";
pub const NO_IMAGE_POSTS: &str = "No image posts found matching your search";

pub const IMAGE_EMBED_COLOR: u32 = 0x34_98_DB;

/// Reply for a search that returned nothing (or failed).
pub fn no_posts_found(raw_tags: &str, raw_filter: &str) -> String {
    let tags = raw_tags.trim();
    let filter = raw_filter.trim();

    let mut message = "No posts found".to_string();
    if !tags.is_empty() {
        message.push_str(&format!(" with tags: {tags}"));
    }
    if !filter.is_empty() {
        let joiner = if tags.is_empty() { "with" } else { "and" };
        message.push_str(&format!(" {joiner} filter: {filter}"));
    }
    message
}

/// Platform-neutral description of the public image reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReply {
    pub title: String,
    pub image_url: String,
    pub footer: String,
    pub color: u32,
}

impl ImageReply {
    /// The footer echoes the tag text exactly as the user typed it.
    pub fn from_selection(selection: &SelectionResult) -> Self {
        let footer = if selection.raw_tags.is_empty() {
            "Random image post".to_string()
        } else {
            format!("Tags: {}", selection.raw_tags)
        };

        Self {
            title: format!("Random Image (Rating: {})", selection.display_rating()),
            image_url: selection.media_url.clone(),
            footer,
            color: IMAGE_EMBED_COLOR,
        }
    }
}
