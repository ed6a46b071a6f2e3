//! Turning fetched posts into the single image to post.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::post::Post;

/// Result of asking the board for posts.
///
/// Failure and an empty answer are kept apart here even though the command
/// reports both the same way, so logs can tell them apart.
#[derive(Debug)]
pub enum FetchOutcome<E> {
    Posts(Vec<Post>),
    NoPosts,
    FetchFailed(E),
}

impl<E> FetchOutcome<E> {
    pub fn from_result(result: Result<Vec<Post>, E>) -> Self {
        match result {
            Ok(posts) if posts.is_empty() => Self::NoPosts,
            Ok(posts) => Self::Posts(posts),
            Err(err) => Self::FetchFailed(err),
        }
    }
}

/// The chosen post, reduced to what the reply shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    pub post_id: Option<u64>,
    pub media_url: String,
    pub rating: Option<String>,
    /// Tag text exactly as the user typed it.
    pub raw_tags: String,
}

impl SelectionResult {
    /// Rating for display: uppercased, `?` when unknown.
    pub fn display_rating(&self) -> String {
        self.rating
            .as_deref()
            .map(str::to_uppercase)
            .unwrap_or_else(|| "?".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Picked(SelectionResult),
    /// Posts were fetched but none of them is an image.
    NoImage,
}

/// Uniformly random element of `items`, `None` when empty.
pub fn pick_random<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    items.choose(rng)
}

/// Keep image posts and pick one of them at random.
pub fn select_image<R>(posts: &[Post], raw_tags: &str, rng: &mut R) -> Selection
where
    R: Rng + ?Sized,
{
    let images: Vec<&Post> = posts.iter().filter(|post| post.is_image()).collect();

    let Some(post) = pick_random(&images, rng) else {
        return Selection::NoImage;
    };

    match post.file_url.as_deref() {
        Some(url) => Selection::Picked(SelectionResult {
            post_id: post.id,
            media_url: url.to_string(),
            rating: post.rating.clone(),
            raw_tags: raw_tags.to_string(),
        }),
        // is_image guarantees a url
        None => Selection::NoImage,
    }
}
