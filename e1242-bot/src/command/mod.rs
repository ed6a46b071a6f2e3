//! The `/random` command, independent of the Discord transport.
//!
//! [`run_random_command`] walks one invocation from precondition check to a
//! single terminal reply. Everything it talks to is behind a trait, so the
//! whole flow runs in tests without a gateway connection or network.

mod messages;

use e1242_core::{FetchOutcome, Selection, TagQuery, select_image};
use rand::Rng;
use tracing::{error, info, warn};

use crate::board::PostSource;

pub use messages::{IMAGE_EMBED_COLOR, ImageReply, NO_IMAGE_POSTS, NSFW_ONLY, no_posts_found};

/// Options of one `/random` invocation, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct RandomCommand {
    pub tags: String,
    pub filter: String,
    /// Whether the invoking channel is age-restricted.
    pub nsfw_allowed: bool,
}

/// Terminal state of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Invoked outside an NSFW channel; nothing was fetched.
    Refused,
    /// The fetch failed or returned no posts.
    Empty,
    /// Posts came back but none of them is an image.
    NoImage,
    Sent,
}

/// Reply channel for one invocation.
///
/// `refuse` answers the interaction directly; the other replies follow an
/// `acknowledge`.
#[async_trait::async_trait]
pub trait CommandResponder: Send + Sync {
    /// Private refusal sent instead of acknowledging.
    async fn refuse(&self, content: &str) -> serenity::Result<()>;
    /// Tell the platform a reply is coming.
    async fn acknowledge(&self) -> serenity::Result<()>;
    async fn reply_private(&self, content: &str) -> serenity::Result<()>;
    async fn reply_image(&self, reply: &ImageReply) -> serenity::Result<()>;
}

fn log_reply_failure(result: serenity::Result<()>, what: &str) {
    if let Err(e) = result {
        error!("Failed to send {}: {}", what, e);
    }
}

/// Run one `/random` invocation to completion.
pub async fn run_random_command<R>(
    source: &dyn PostSource,
    responder: &dyn CommandResponder,
    command: &RandomCommand,
    limit: usize,
    rng: &mut R,
) -> CommandOutcome
where
    R: Rng + Send + ?Sized,
{
    if !command.nsfw_allowed {
        info!(event_kind = "command", "/random refused outside NSFW channel");
        log_reply_failure(responder.refuse(NSFW_ONLY).await, "NSFW refusal");
        return CommandOutcome::Refused;
    }

    log_reply_failure(responder.acknowledge().await, "acknowledgement");

    let query = TagQuery::from_input(&command.tags, &command.filter);
    info!(
        event_kind = "command",
        query = %query,
        "/random searching with {} tags",
        query.len()
    );

    let posts = match FetchOutcome::from_result(source.fetch(query.tags(), limit).await) {
        FetchOutcome::Posts(posts) => posts,
        outcome => {
            match outcome {
                FetchOutcome::FetchFailed(e) => {
                    warn!(event_kind = "command", "/random fetch failed: {}", e)
                }
                _ => info!(event_kind = "command", "/random fetch returned no posts"),
            }
            let message = no_posts_found(&command.tags, &command.filter);
            log_reply_failure(responder.reply_private(&message).await, "no-posts reply");
            return CommandOutcome::Empty;
        }
    };

    let selected = match select_image(&posts, &command.tags, rng) {
        Selection::Picked(selected) => selected,
        Selection::NoImage => {
            info!(
                event_kind = "command",
                "/random: none of {} posts is an image",
                posts.len()
            );
            log_reply_failure(
                responder.reply_private(NO_IMAGE_POSTS).await,
                "no-image reply",
            );
            return CommandOutcome::NoImage;
        }
    };

    info!(
        event_kind = "command",
        post_id = ?selected.post_id,
        "/random picked {}",
        selected.media_url
    );
    let reply = ImageReply::from_selection(&selected);
    log_reply_failure(responder.reply_image(&reply).await, "image reply");
    CommandOutcome::Sent
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use e1242_core::{BoardSettings, Post};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::board::{BoardClient, BoardError};

    enum Canned {
        Posts(Vec<Post>),
        Fail,
    }

    struct FakeSource {
        canned: Canned,
        calls: AtomicUsize,
        seen: Mutex<Vec<(Vec<String>, usize)>>,
    }

    impl FakeSource {
        fn new(canned: Canned) -> Self {
            Self {
                canned,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn posts(values: Vec<serde_json::Value>) -> Self {
            Self::new(Canned::Posts(values.iter().map(Post::from_value).collect()))
        }
    }

    #[async_trait::async_trait]
    impl PostSource for FakeSource {
        async fn fetch(&self, tags: &[String], limit: usize) -> Result<Vec<Post>, BoardError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push((tags.to_vec(), limit));
            match &self.canned {
                Canned::Posts(posts) => Ok(posts.clone()),
                Canned::Fail => Err(BoardError::UnexpectedContentType("text/html".to_string())),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Sent {
        Refusal(String),
        Ack,
        Private(String),
        Image(ImageReply),
    }

    #[derive(Default)]
    struct RecordingResponder {
        sent: Mutex<Vec<Sent>>,
    }

    impl RecordingResponder {
        fn sent(&self) -> Vec<Sent> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl CommandResponder for RecordingResponder {
        async fn refuse(&self, content: &str) -> serenity::Result<()> {
            self.sent.lock().unwrap().push(Sent::Refusal(content.to_string()));
            Ok(())
        }

        async fn acknowledge(&self) -> serenity::Result<()> {
            self.sent.lock().unwrap().push(Sent::Ack);
            Ok(())
        }

        async fn reply_private(&self, content: &str) -> serenity::Result<()> {
            self.sent.lock().unwrap().push(Sent::Private(content.to_string()));
            Ok(())
        }

        async fn reply_image(&self, reply: &ImageReply) -> serenity::Result<()> {
            self.sent.lock().unwrap().push(Sent::Image(reply.clone()));
            Ok(())
        }
    }

    fn nsfw(tags: &str, filter: &str) -> RandomCommand {
        RandomCommand {
            tags: tags.to_string(),
            filter: filter.to_string(),
            nsfw_allowed: true,
        }
    }

    async fn run(source: &FakeSource, command: &RandomCommand) -> (CommandOutcome, Vec<Sent>) {
        let responder = RecordingResponder::default();
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = run_random_command(source, &responder, command, 100, &mut rng).await;
        (outcome, responder.sent())
    }

    #[tokio::test]
    async fn test_empty_posts_replies_no_posts_found() {
        let source = FakeSource::posts(vec![]);
        let (outcome, sent) = run(&source, &nsfw("wolf", "")).await;

        assert_eq!(outcome, CommandOutcome::Empty);
        assert_eq!(
            sent,
            vec![
                Sent::Ack,
                Sent::Private("No posts found with tags: wolf".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_only_video_posts_replies_no_image() {
        let source = FakeSource::posts(vec![json!({ "file": { "url": "https://x/y.webm" } })]);
        let (outcome, sent) = run(&source, &nsfw("wolf", "")).await;

        assert_eq!(outcome, CommandOutcome::NoImage);
        assert_eq!(
            sent,
            vec![Sent::Ack, Sent::Private(NO_IMAGE_POSTS.to_string())]
        );
    }

    #[tokio::test]
    async fn test_image_post_is_sent_publicly() {
        let source = FakeSource::posts(vec![json!({
            "id": 7,
            "file": { "url": "https://x/y.png" },
            "rating": "s"
        })]);
        let (outcome, sent) = run(&source, &nsfw("wolf solo", "")).await;

        assert_eq!(outcome, CommandOutcome::Sent);
        assert_eq!(
            sent,
            vec![
                Sent::Ack,
                Sent::Image(ImageReply {
                    title: "Random Image (Rating: S)".to_string(),
                    image_url: "https://x/y.png".to_string(),
                    footer: "Tags: wolf solo".to_string(),
                    color: IMAGE_EMBED_COLOR,
                })
            ]
        );
    }

    #[tokio::test]
    async fn test_non_nsfw_channel_is_refused_without_fetch() {
        let source = FakeSource::posts(vec![json!({ "file": { "url": "https://x/y.png" } })]);
        let command = RandomCommand {
            nsfw_allowed: false,
            ..nsfw("wolf", "safe")
        };
        let (outcome, sent) = run(&source, &command).await;

        assert_eq!(outcome, CommandOutcome::Refused);
        assert_eq!(sent, vec![Sent::Refusal(NSFW_ONLY.to_string())]);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_replies_no_posts_found() {
        let source = FakeSource::new(Canned::Fail);
        let (outcome, sent) = run(&source, &nsfw("wolf", "explicit")).await;

        assert_eq!(outcome, CommandOutcome::Empty);
        assert_eq!(
            sent,
            vec![
                Sent::Ack,
                Sent::Private("No posts found with tags: wolf and filter: explicit".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_query_includes_rating_and_limit() {
        let source = FakeSource::posts(vec![]);
        let responder = RecordingResponder::default();
        let mut rng = StdRng::seed_from_u64(1);
        run_random_command(&source, &responder, &nsfw(" wolf  solo ", "QUESTIONABLE"), 42, &mut rng)
            .await;

        let seen = source.seen.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![(
                vec!["wolf".to_string(), "solo".to_string(), "rating:q".to_string()],
                42
            )]
        );
    }

    #[tokio::test]
    async fn test_unknown_filter_is_ignored() {
        let source = FakeSource::posts(vec![]);
        run(&source, &nsfw("wolf", "spicy")).await;

        let seen = source.seen.lock().unwrap().clone();
        assert_eq!(seen[0].0, vec!["wolf".to_string()]);
    }

    #[tokio::test]
    async fn test_no_tags_uses_generic_footer() {
        let source = FakeSource::posts(vec![json!({ "file": { "url": "https://x/y.GIF" } })]);
        let (outcome, sent) = run(&source, &nsfw("", "")).await;

        assert_eq!(outcome, CommandOutcome::Sent);
        match &sent[1] {
            Sent::Image(reply) => {
                assert_eq!(reply.footer, "Random image post");
                assert_eq!(reply.title, "Random Image (Rating: ?)");
            }
            other => panic!("expected image reply, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_picked_image_is_one_of_the_images() {
        let source = FakeSource::posts(vec![
            json!({ "file": { "url": "https://x/a.png" }, "rating": "s" }),
            json!({ "file": { "url": "https://x/b.mp4" }, "rating": "s" }),
            json!({ "file": { "url": "https://x/c.jpg" }, "rating": "e" }),
        ]);

        for seed in 0..50 {
            let responder = RecordingResponder::default();
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome =
                run_random_command(&source, &responder, &nsfw("x", ""), 100, &mut rng).await;
            assert_eq!(outcome, CommandOutcome::Sent);

            match responder.sent().pop() {
                Some(Sent::Image(reply)) => {
                    assert!(
                        reply.image_url == "https://x/a.png" || reply.image_url == "https://x/c.jpg"
                    );
                }
                other => panic!("expected image reply, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_board_timeout_replies_no_posts_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "posts": [{ "file": { "url": "https://x/y.png" } }] }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let settings = BoardSettings {
            base_url: server.uri(),
            ..BoardSettings::default()
        };
        let client = BoardClient::new(&settings)
            .unwrap()
            .with_timeout(Duration::from_millis(100));

        let responder = RecordingResponder::default();
        let mut rng = StdRng::seed_from_u64(1);
        let outcome =
            run_random_command(&client, &responder, &nsfw("wolf", ""), 100, &mut rng).await;

        assert_eq!(outcome, CommandOutcome::Empty);
        assert_eq!(
            responder.sent(),
            vec![
                Sent::Ack,
                Sent::Private("No posts found with tags: wolf".to_string())
            ]
        );
    }
}
