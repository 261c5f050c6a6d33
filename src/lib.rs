//! Feed ingestion and normalization pipeline.
//!
//! feedsync subscribes to RSS/Atom feeds, fetches and parses them into a
//! canonical [`models::Feed`]/[`models::Post`] model, and persists posts to
//! SQLite with link-based de-duplication and per-post read state.
//!
//! The pipeline is composed of small, independently testable pieces:
//!
//! - [`util`]: pure URL validation/normalization and text sanitization
//! - [`feed`]: HTTP fetch, feed parsing, and the sync orchestrator
//! - [`storage`]: subscription and post persistence on top of sqlx/SQLite
//! - [`config`]: optional TOML configuration

pub mod config;
pub mod feed;
pub mod models;
pub mod storage;
pub mod util;
