use std::time::Duration;
use thiserror::Error;

/// Default wall-clock budget for one fetch, covering both the request
/// and the body read. Overridable via the `fetch_timeout_secs` config
/// key. No retries are attempted; a timeout is terminal for that feed's
/// sync attempt.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur while retrieving raw feed bytes.
///
/// Both variants carry the offending URL so a sync pass can report which
/// subscription failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connection, TLS) or body-read error.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The request and body read did not complete within the timeout.
    #[error("request to {url} timed out")]
    Timeout { url: String },
}

/// Fetches the raw bytes of a feed URL with a single GET, bounded by
/// `timeout` ([`DEFAULT_FETCH_TIMEOUT`] unless configured otherwise).
///
/// The full response body is buffered into memory. HTTP status codes are
/// not special-cased: any successfully read body is returned and format
/// errors are deferred to the parser. The response handle is dropped on
/// every exit path, releasing the connection.
pub async fn fetch_url(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<Vec<u8>, FetchError> {
    let request = async {
        let response = client.get(url).send().await?;
        let bytes = response.bytes().await?;
        Ok::<_, reqwest::Error>(bytes.to_vec())
    };

    match tokio::time::timeout(timeout, request).await {
        Err(_) => {
            tracing::warn!(url = %url, "feed fetch timed out");
            Err(FetchError::Timeout {
                url: url.to_owned(),
            })
        }
        Ok(Err(source)) => Err(FetchError::Network {
            url: url.to_owned(),
            source,
        }),
        Ok(Ok(bytes)) => Ok(bytes),
    }
}
