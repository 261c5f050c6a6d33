use super::schema::Database;
use super::types::{DatabaseError, FeedRow};
use crate::models::Feed;

impl Database {
    // ========================================================================
    // Subscription Operations
    // ========================================================================

    /// Insert a new subscription, returning its assigned id.
    ///
    /// `url` must already be the normalized form. A URL that is already
    /// subscribed surfaces as [`DatabaseError::Duplicate`], never a silent
    /// overwrite.
    pub async fn add_feed(&self, url: &str, title: &str) -> Result<i64, DatabaseError> {
        let result = sqlx::query("INSERT INTO feeds (url, title) VALUES (?, ?)")
            .bind(url)
            .bind(title)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx(url, e))?;
        Ok(result.last_insert_rowid())
    }

    /// All subscriptions in insertion (primary key) order, posts not
    /// populated. An empty store yields an empty vec, never an error.
    pub async fn get_feeds(&self) -> Result<Vec<Feed>, DatabaseError> {
        let rows: Vec<FeedRow> = sqlx::query_as("SELECT id, url, title FROM feeds ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, url, title)| Feed {
                id,
                url,
                title: title.unwrap_or_default(),
                posts: Vec::new(),
            })
            .collect())
    }

    /// Overwrite url and title for the row matching `feed.id`.
    ///
    /// A nonexistent id affects zero rows and reports success; the engine's
    /// zero-rows-affected result is propagated, not turned into an error.
    pub async fn update_feed(&self, feed: &Feed) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE feeds SET url = ?, title = ? WHERE id = ?")
            .bind(&feed.url)
            .bind(&feed.title)
            .bind(feed.id)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx(&feed.url, e))?;
        Ok(())
    }

    /// Remove a subscription; its posts go with it via cascade delete.
    /// Deleting a nonexistent id is a no-op that reports success.
    pub async fn delete_feed(&self, id: i64) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM feeds WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
