use thiserror::Error;

/// Ellipsis appended when a description is cut short
const ELLIPSIS: &str = "...";

/// Maximum title length in bytes after sanitization, no ellipsis applied
pub const MAX_TITLE_LENGTH: usize = 500;

/// Errors that can occur while validating a feed title.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TitleError {
    /// The title was empty or all whitespace.
    #[error("title cannot be empty")]
    Empty,
    /// The trimmed title exceeds the byte cap.
    #[error("title cannot exceed {MAX_TITLE_LENGTH} bytes")]
    TooLong,
}

/// Largest index `<= max` that lies on a char boundary of `s`.
///
/// Truncation targets are byte counts, but Rust strings must remain valid
/// UTF-8, so a cut that would split a multi-byte character backs off to the
/// previous boundary.
fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    let mut idx = max;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Cleans and normalizes a feed or post title.
///
/// Tabs, carriage returns, and newlines become single spaces; surrounding
/// whitespace is trimmed; runs of two or more spaces collapse to one; the
/// result is cut to [`MAX_TITLE_LENGTH`] bytes with no ellipsis.
///
/// ```
/// use feedsync::util::sanitize_title;
///
/// assert_eq!(sanitize_title("  Hello    World  "), "Hello World");
/// assert_eq!(sanitize_title("Line\none\ttwo"), "Line one two");
/// ```
pub fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| if matches!(c, '\t' | '\r' | '\n') { ' ' } else { c })
        .collect();

    let mut out = String::with_capacity(cleaned.len());
    let mut prev_space = false;
    for c in cleaned.trim().chars() {
        if c == ' ' {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }

    out.truncate(floor_char_boundary(&out, MAX_TITLE_LENGTH));
    out
}

/// Validates a caller-supplied feed title.
///
/// Leading and trailing whitespace is ignored for both checks. Unlike
/// [`sanitize_title`], which silently caps overlong input, this rejects
/// it so the caller can report the problem.
///
/// # Errors
///
/// - [`TitleError::Empty`] for empty or whitespace-only input
/// - [`TitleError::TooLong`] when the trimmed title exceeds
///   [`MAX_TITLE_LENGTH`] bytes
pub fn validate_title(title: &str) -> Result<(), TitleError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TitleError::Empty);
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(TitleError::TooLong);
    }
    Ok(())
}

/// Truncates a description to at most `max_len` bytes.
///
/// - `max_len < 0`: the trimmed input is returned unmodified
/// - `max_len == 0`: empty string
/// - trimmed input fits: returned as-is
/// - `max_len <= 3`: first `max_len` bytes, no ellipsis
/// - otherwise: first `max_len - 3` bytes followed by `...`
///
/// Cutoffs are byte counts; a cut landing inside a multi-byte character
/// backs off to the previous char boundary, so the result can be up to
/// three bytes shorter than `max_len` for non-ASCII input.
///
/// ```
/// use feedsync::util::truncate_description;
///
/// assert_eq!(truncate_description("This is a long description", 10), "This is...");
/// ```
pub fn truncate_description(desc: &str, max_len: i64) -> String {
    if max_len == 0 {
        return String::new();
    }

    let desc = desc.trim();
    if max_len < 0 {
        return desc.to_string();
    }

    let max = max_len as usize;
    if desc.len() <= max {
        return desc.to_string();
    }

    if max <= 3 {
        return desc[..floor_char_boundary(desc, max)].to_string();
    }

    let cut = floor_char_boundary(desc, max - 3);
    format!("{}{}", &desc[..cut], ELLIPSIS)
}

/// Checks whether trimmed content begins like an RSS/Atom/XML document.
///
/// Case-sensitive prefix check for `<?xml`, `<rss`, or `<feed`; no
/// byte-order-mark handling.
pub fn is_valid_xml_start(content: &str) -> bool {
    let content = content.trim();
    if content.is_empty() {
        return false;
    }

    content.starts_with("<?xml") || content.starts_with("<rss") || content.starts_with("<feed")
}
