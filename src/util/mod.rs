//! Pure helper functions for the ingestion pipeline.
//!
//! - **URL handling**: validation, normalization, domain extraction, and a
//!   lexical feed-path heuristic
//! - **Text processing**: title sanitization, byte-bounded description
//!   truncation, and XML prefix sniffing
//!
//! Everything here is side-effect free and synchronous.

mod text;
mod url;

pub use self::text::{
    is_valid_xml_start, sanitize_title, truncate_description, validate_title, TitleError,
    MAX_TITLE_LENGTH,
};
pub use self::url::{extract_domain, is_valid_rss_path, normalize_url, validate_url, UrlError};
