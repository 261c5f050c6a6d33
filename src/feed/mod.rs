//! The fetch → parse → sanitize → persist pipeline.

mod fetcher;
mod parser;
mod sync;

pub use fetcher::{fetch_url, FetchError, DEFAULT_FETCH_TIMEOUT};
pub use parser::{parse_feed, ParseError};
pub use sync::{sync_all, SyncError, SyncOptions, SyncOutcome};
