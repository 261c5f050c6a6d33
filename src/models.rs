//! Canonical data model shared by the parser, orchestrator, and store.

/// A single syndicated entry belonging to a feed.
///
/// Created transiently by the parser for every feed item; persisted by the
/// store only when [`Post::is_valid`] holds and the link is not already
/// known. `id` is 0 until the store assigns one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub link: String,
    /// Body text: feed-supplied content when present and non-empty,
    /// otherwise the feed-supplied description, otherwise empty.
    pub content: String,
    /// Unix timestamp of the item's publication date, when the feed had one.
    pub published_at: Option<i64>,
    /// Defaults to false on ingestion; only mutated by a user read action.
    pub read: bool,
}

impl Post {
    /// A post is valid iff its trimmed title and trimmed link are both
    /// non-empty. Invalid posts must never be persisted.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.link.trim().is_empty()
    }

    /// Returns a copy with title, link, and content trimmed.
    pub fn sanitized(&self) -> Post {
        Post {
            id: self.id,
            title: self.title.trim().to_string(),
            link: self.link.trim().to_string(),
            content: self.content.trim().to_string(),
            published_at: self.published_at,
            read: self.read,
        }
    }
}

/// A subscription endpoint plus its ingested posts.
///
/// `url` is always the normalization-validated form before being handed to
/// the store. `posts` preserve the feed's item order as parsed; the store
/// leaves them empty when listing subscriptions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feed {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub posts: Vec<Post>,
}

impl Feed {
    /// True if any loaded post is unread.
    pub fn has_unread_posts(&self) -> bool {
        self.posts.iter().any(|p| !p.read)
    }

    /// Number of loaded posts that are unread.
    pub fn unread_count(&self) -> usize {
        self.posts.iter().filter(|p| !p.read).count()
    }
}
