//! Durable subscription and post state on SQLite.

mod feeds;
mod posts;
mod schema;
mod types;

pub use schema::Database;
pub use types::DatabaseError;
