use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;
use std::time::Duration;

use super::types::DatabaseError;

/// Handle to the subscription store.
///
/// Cheap to clone; all clones share one connection pool. Reads may be
/// issued concurrently; SQLite's default transaction mode serializes
/// writes.
#[derive(Clone)]
pub struct Database {
    pub(crate) pool: SqlitePool,
}

impl Database {
    /// Open a database connection and run migrations.
    ///
    /// This is the one fatal error class of the pipeline: a store that
    /// cannot be opened or migrated terminates the process at the caller.
    /// Pass `":memory:"` for an ephemeral database in tests.
    pub async fn open(path: &str) -> Result<Self, DatabaseError> {
        let memory = path == ":memory:";
        let url = if memory {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite:{}?mode=rwc", path)
        };

        // Pragmas set here apply to every pooled connection. busy_timeout:
        // wait up to 5s for transient lock contention instead of returning
        // SQLITE_BUSY immediately. foreign_keys is per-connection and the
        // posts cascade delete depends on it.
        let options = SqliteConnectOptions::from_str(&url)?
            .pragma("busy_timeout", "5000")
            .pragma("foreign_keys", "ON");

        // An in-memory database exists per connection, so the pool must
        // stay at a single connection or each one would see an empty db.
        let pool = SqlitePoolOptions::new()
            .max_connections(if memory { 1 } else { 5 })
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate()
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;
        Ok(db)
    }

    /// Create the schema if it does not exist. Idempotent; all DDL runs
    /// in one transaction so a partial failure leaves the previous state.
    async fn migrate(&self) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS feeds (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url TEXT UNIQUE NOT NULL,
                title TEXT
            )
        "#,
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                feed_id INTEGER NOT NULL REFERENCES feeds(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                link TEXT UNIQUE NOT NULL,
                content TEXT,
                published_at TIMESTAMP,
                read BOOLEAN NOT NULL DEFAULT 0
            )
        "#,
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_posts_feed ON posts(feed_id)")
            .execute(&mut *tx)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_posts_read ON posts(read)")
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
