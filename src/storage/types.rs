use thiserror::Error;

use crate::models::Post;

/// Storage-layer errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Unique-key violation surfaced to the caller (duplicate feed URL).
    /// Duplicate post links are not errors; they are skipped during insert.
    #[error("already subscribed: {0}")]
    Duplicate(String),

    /// Schema creation failed while opening the database.
    #[error("database migration failed: {0}")]
    Migration(String),

    /// Generic database error.
    #[error("database error: {0}")]
    Other(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Maps a sqlx error to [`DatabaseError::Duplicate`] when it is a
    /// unique-constraint violation, tagging it with `subject`.
    pub(crate) fn from_sqlx(subject: &str, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return DatabaseError::Duplicate(subject.to_owned());
            }
        }
        DatabaseError::Other(err)
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, DatabaseError::Duplicate(_))
    }
}

/// Row shape for subscription listings: (id, url, title)
pub(crate) type FeedRow = (i64, String, Option<String>);

/// Internal row type for post queries, converted via `into_post`
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct PostRow {
    pub id: i64,
    pub title: String,
    pub link: String,
    pub content: Option<String>,
    pub published_at: Option<i64>,
    pub read: bool,
}

impl PostRow {
    pub(crate) fn into_post(self) -> Post {
        Post {
            id: self.id,
            title: self.title,
            link: self.link,
            content: self.content.unwrap_or_default(),
            published_at: self.published_at,
            read: self.read,
        }
    }
}
