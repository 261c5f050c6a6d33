use std::time::Duration;
use thiserror::Error;

use crate::feed::fetcher::{fetch_url, FetchError, DEFAULT_FETCH_TIMEOUT};
use crate::feed::parser::{parse_feed, ParseError};
use crate::models::{Feed, Post};
use crate::storage::{Database, DatabaseError};
use crate::util::{sanitize_title, truncate_description};

/// Why one subscription's sync attempt failed.
///
/// A failure here is recorded against that feed and never aborts the
/// rest of the pass.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("failed to store posts: {0}")]
    Database(#[from] DatabaseError),
}

/// Outcome of one subscription within a sync pass: the number of newly
/// inserted posts, or the error that stopped the attempt.
///
/// On success `title` is the sanitized title the feed document declared;
/// on failure it falls back to the stored subscription title.
#[derive(Debug)]
pub struct SyncOutcome {
    pub feed_id: i64,
    pub title: String,
    pub result: Result<usize, SyncError>,
}

/// Tuning knobs for a sync pass.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Byte cap applied to post content via [`truncate_description`].
    /// Negative disables truncation.
    pub max_description_length: i64,
    /// Wall-clock budget for each feed's fetch.
    pub fetch_timeout: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            max_description_length: 300,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Runs one sync pass: fetch, parse, sanitize, and persist every
/// subscription in the store, sequentially.
///
/// Per-feed fetch/parse/store failures are captured in that feed's
/// [`SyncOutcome`] and the pass moves on to the next subscription. The
/// orchestrator keeps no state between passes; the only fatal error is
/// failing to list the subscriptions themselves.
pub async fn sync_all(
    db: &Database,
    client: &reqwest::Client,
    options: &SyncOptions,
) -> Result<Vec<SyncOutcome>, DatabaseError> {
    let subscriptions = db.get_feeds().await?;
    tracing::info!(count = subscriptions.len(), "starting sync pass");

    let mut outcomes = Vec::with_capacity(subscriptions.len());
    for subscription in subscriptions {
        let (title, result) = match sync_one(db, client, &subscription, options).await {
            Ok((title, inserted)) => {
                tracing::info!(url = %subscription.url, inserted = inserted, "feed synced");
                (title, Ok(inserted))
            }
            Err(e) => {
                tracing::warn!(url = %subscription.url, error = %e, "feed sync failed");
                (subscription.title.clone(), Err(e))
            }
        };
        outcomes.push(SyncOutcome {
            feed_id: subscription.id,
            title,
            result,
        });
    }

    Ok(outcomes)
}

/// Fetch, parse, sanitize, and persist a single subscription.
/// Returns the sanitized title the fetched document declared and the
/// number of posts actually inserted (new, valid, non-duplicate).
async fn sync_one(
    db: &Database,
    client: &reqwest::Client,
    subscription: &Feed,
    options: &SyncOptions,
) -> Result<(String, usize), SyncError> {
    let bytes = fetch_url(client, &subscription.url, options.fetch_timeout).await?;
    let parsed = parse_feed(&subscription.url, &bytes)?;
    let title = sanitize_title(&parsed.title);

    let posts: Vec<Post> = parsed
        .posts
        .into_iter()
        .map(|post| {
            let mut post = post.sanitized();
            post.title = sanitize_title(&post.title);
            post.content = truncate_description(&post.content, options.max_description_length);
            post
        })
        .collect();

    let inserted = db.insert_posts(subscription.id, &posts).await?;
    Ok((title, inserted))
}
