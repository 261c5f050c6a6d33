use super::schema::Database;
use super::types::{DatabaseError, PostRow};
use crate::models::Post;

impl Database {
    // ========================================================================
    // Post Operations
    // ========================================================================

    /// Insert posts for a feed, returning the number actually inserted.
    ///
    /// Invalid posts (empty trimmed title or link) are skipped, never
    /// persisted. A post whose link already exists anywhere in the store is
    /// the same real-world item and is skipped via `ON CONFLICT DO
    /// NOTHING`; this is the de-duplication mechanism, not a failure.
    pub async fn insert_posts(&self, feed_id: i64, posts: &[Post]) -> Result<usize, DatabaseError> {
        let mut inserted = 0;

        for post in posts {
            if !post.is_valid() {
                tracing::debug!(feed_id = feed_id, link = %post.link, "skipping invalid post");
                continue;
            }

            let result = sqlx::query(
                r#"
                INSERT INTO posts (feed_id, title, link, content, published_at)
                VALUES (?, ?, ?, ?, ?)
                ON CONFLICT(link) DO NOTHING
            "#,
            )
            .bind(feed_id)
            .bind(&post.title)
            .bind(&post.link)
            .bind(&post.content)
            .bind(post.published_at)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() > 0 {
                inserted += 1;
            }
        }

        Ok(inserted)
    }

    /// All posts belonging to a feed, in insertion order.
    pub async fn get_posts(&self, feed_id: i64) -> Result<Vec<Post>, DatabaseError> {
        let rows: Vec<PostRow> = sqlx::query_as(
            r#"
            SELECT id, title, link, content, published_at, read
            FROM posts
            WHERE feed_id = ?
            ORDER BY id
        "#,
        )
        .bind(feed_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    /// Mark a post as read. Nonexistent ids affect zero rows and report
    /// success.
    pub async fn mark_post_read(&self, post_id: i64) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE posts SET read = 1 WHERE id = ?")
            .bind(post_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
