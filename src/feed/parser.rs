use feed_rs::parser;
use thiserror::Error;

use crate::models::{Feed, Post};

/// Raw bytes could not be decoded as an RSS/Atom document.
///
/// Covers malformed XML, empty input, and non-feed content. No partial
/// feed is ever returned on error.
#[derive(Debug, Error)]
#[error("failed to parse feed from {url}: {source}")]
pub struct ParseError {
    url: String,
    #[source]
    source: parser::ParseFeedError,
}

/// Decodes raw feed bytes into the canonical [`Feed`] model.
///
/// Feed-grammar decoding is delegated to feed-rs; this layer only maps the
/// decoded document onto [`Feed`]/[`Post`] and applies the content-priority
/// rule: a post's content is the item's content body when present and
/// non-empty, otherwise the item's description, otherwise empty. An empty
/// (not just absent) content field still triggers the description fallback.
///
/// Titles and links are carried verbatim; sanitization is a separate,
/// explicitly invoked step. HTML entities are already unescaped by the
/// decoder. A feed with zero items parses to an empty post list, not an
/// error.
pub fn parse_feed(url: &str, bytes: &[u8]) -> Result<Feed, ParseError> {
    let decoded = parser::parse(bytes).map_err(|source| ParseError {
        url: url.to_owned(),
        source,
    })?;

    let posts = decoded
        .entries
        .into_iter()
        .map(|entry| {
            let content = entry
                .content
                .and_then(|c| c.body)
                .filter(|body| !body.is_empty())
                .or_else(|| entry.summary.map(|s| s.content))
                .unwrap_or_default();

            Post {
                id: 0,
                title: entry.title.map(|t| t.content).unwrap_or_default(),
                link: entry
                    .links
                    .first()
                    .map(|l| l.href.clone())
                    .unwrap_or_default(),
                content,
                published_at: entry
                    .published
                    .or(entry.updated)
                    .map(|dt| dt.timestamp()),
                read: false,
            }
        })
        .collect();

    Ok(Feed {
        id: 0,
        title: decoded.title.map(|t| t.content).unwrap_or_default(),
        url: url.to_owned(),
        posts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const URL: &str = "http://test.com";

    fn rss(channel_body: &str) -> String {
        format!(
            "<?xml version=\"1.0\"?>\
             <rss version=\"2.0\" xmlns:content=\"http://purl.org/rss/1.0/modules/content/\">\
             <channel>{}</channel></rss>",
            channel_body
        )
    }

    #[test]
    fn test_basic_feed() {
        let data = rss(
            "<title>Test Blog</title>\
             <item><title>Post</title><link>http://example.com</link></item>",
        );
        let feed = parse_feed(URL, data.as_bytes()).unwrap();

        assert_eq!(feed.title, "Test Blog");
        assert_eq!(feed.url, URL);
        assert_eq!(feed.posts.len(), 1);
        assert_eq!(feed.posts[0].title, "Post");
        assert_eq!(feed.posts[0].link, "http://example.com");
        assert_eq!(feed.posts[0].content, "");
        assert!(!feed.posts[0].read);
    }

    #[test]
    fn test_content_takes_priority_over_description() {
        let data = rss(
            "<title>Test</title>\
             <item><title>Post</title><link>http://example.com</link>\
             <content:encoded>Priority Content</content:encoded>\
             <description>Fallback Description</description></item>",
        );
        let feed = parse_feed(URL, data.as_bytes()).unwrap();
        assert_eq!(feed.posts[0].content, "Priority Content");
    }

    #[test]
    fn test_description_used_when_no_content() {
        let data = rss(
            "<title>Test</title>\
             <item><title>Post</title><link>http://example.com</link>\
             <description>Fallback Description</description></item>",
        );
        let feed = parse_feed(URL, data.as_bytes()).unwrap();
        assert_eq!(feed.posts[0].content, "Fallback Description");
    }

    #[test]
    fn test_empty_content_falls_back_to_description() {
        let data = rss(
            "<title>Test</title>\
             <item><title>Post</title><link>http://example.com</link>\
             <content:encoded></content:encoded>\
             <description>Should Use This</description></item>",
        );
        let feed = parse_feed(URL, data.as_bytes()).unwrap();
        assert_eq!(feed.posts[0].content, "Should Use This");
    }

    #[test]
    fn test_empty_when_both_missing() {
        let data = rss(
            "<title>Test</title>\
             <item><title>Post</title><link>http://example.com</link></item>",
        );
        let feed = parse_feed(URL, data.as_bytes()).unwrap();
        assert_eq!(feed.posts[0].content, "");
    }

    #[test]
    fn test_empty_feed_no_items() {
        let data = rss("<title>Empty Feed</title>");
        let feed = parse_feed(URL, data.as_bytes()).unwrap();
        assert_eq!(feed.title, "Empty Feed");
        assert!(feed.posts.is_empty());
    }

    #[test]
    fn test_missing_feed_title() {
        let data = rss("<item><title>Post</title><link>http://example.com</link></item>");
        let feed = parse_feed(URL, data.as_bytes()).unwrap();
        assert_eq!(feed.title, "");
        assert_eq!(feed.posts.len(), 1);
    }

    #[test]
    fn test_html_entities_unescaped_by_decoder() {
        let data = rss("<title>&lt;Test&gt; &amp; Blog</title>");
        let feed = parse_feed(URL, data.as_bytes()).unwrap();
        assert_eq!(feed.title, "<Test> & Blog");
    }

    #[test]
    fn test_cdata_description() {
        let data = rss(
            "<title>Test</title>\
             <item><title>Post</title><link>http://example.com</link>\
             <description><![CDATA[<p>HTML content</p>]]></description></item>",
        );
        let feed = parse_feed(URL, data.as_bytes()).unwrap();
        assert_eq!(feed.posts[0].content, "<p>HTML content</p>");
    }

    #[test]
    fn test_unicode_titles() {
        let data = rss(
            "<title>Unicode Test Blog 🚀 日本語 العربية</title>\
             <item><title>émojis ✨</title><link>http://example.com/1</link></item>",
        );
        let feed = parse_feed(URL, data.as_bytes()).unwrap();
        assert_eq!(feed.title, "Unicode Test Blog 🚀 日本語 العربية");
        assert_eq!(feed.posts[0].title, "émojis ✨");
    }

    #[test]
    fn test_item_order_preserved() {
        let items: String = (1..=5)
            .map(|i| {
                format!(
                    "<item><title>Post {i}</title><link>http://example.com/{i}</link></item>"
                )
            })
            .collect();
        let data = rss(&format!("<title>Large Feed</title>{}", items));
        let feed = parse_feed(URL, data.as_bytes()).unwrap();
        assert_eq!(feed.posts.len(), 5);
        for (i, post) in feed.posts.iter().enumerate() {
            assert_eq!(post.title, format!("Post {}", i + 1));
        }
    }

    #[test]
    fn test_published_timestamp_captured() {
        let data = rss(
            "<title>Test</title>\
             <item><title>Post</title><link>http://example.com</link>\
             <pubDate>Tue, 14 Nov 2023 12:00:00 GMT</pubDate></item>",
        );
        let feed = parse_feed(URL, data.as_bytes()).unwrap();
        assert_eq!(feed.posts[0].published_at, Some(1699963200));
    }

    #[test]
    fn test_empty_input_errors() {
        assert!(parse_feed(URL, b"").is_err());
    }

    #[test]
    fn test_whitespace_only_errors() {
        assert!(parse_feed(URL, b"   \n\t  \r\n  ").is_err());
    }

    #[test]
    fn test_non_feed_html_errors() {
        assert!(parse_feed(URL, b"<html><body>Not an RSS feed</body></html>").is_err());
    }

    #[test]
    fn test_malformed_xml_errors() {
        assert!(parse_feed(URL, b"<?xml version=\"1.0\"?><rss><channel><title>Bad").is_err());
    }

    #[test]
    fn test_error_message_names_url() {
        let err = parse_feed("http://bad.example/feed", b"").unwrap_err();
        assert!(err.to_string().contains("http://bad.example/feed"));
    }
}
