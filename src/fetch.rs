//! HTTP fetcher
//!
//! The single I/O primitive the rest of the engine builds on. Sends
//! browser-like headers, follows redirects, and reads the body through a
//! capped, early-terminating stream: reading stops once the byte budget is
//! exceeded or, for head-only consumers, once the end of the document head
//! has been observed.

use crate::config::FetchConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Maximum redirect hops followed before giving up
const MAX_REDIRECTS: usize = 10;

/// Errors from a single fetch operation
///
/// Callers treat every variant as "no data available"; none of them is fatal
/// to a batch or a crawl.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },
}

/// Limits applied to a single capped read
#[derive(Debug, Clone, Copy)]
pub struct FetchLimits {
    /// Stop reading once this many body bytes have been consumed
    pub max_bytes: usize,

    /// Stop reading once the end of the document head is observed
    pub stop_after_head: bool,
}

impl FetchLimits {
    /// Budget for consumers that read into the early body (redirect
    /// sniffing, body extraction)
    pub fn body(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            stop_after_head: false,
        }
    }

    /// Budget for consumers that only need the document head (metadata
    /// extraction)
    pub fn head(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            stop_after_head: true,
        }
    }
}

/// A successfully fetched page
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,

    /// HTTP status code
    pub status: u16,

    /// Body content, possibly truncated at the byte budget
    pub body: String,
}

/// Builds the shared HTTP client with browser-like identification
///
/// A realistic User-Agent and Accept-Language noticeably reduce the rate at
/// which news sites serve block pages instead of articles.
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&config.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, value);
    }

    Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a capped, early-terminating body read
///
/// The response body is consumed chunk by chunk and reading stops as soon as
/// either limit in `limits` is hit, so a multi-megabyte page costs at most
/// the configured budget.
///
/// # Errors
///
/// * `FetchError::Timeout` - the request or body read timed out
/// * `FetchError::HttpStatus` - the server answered with a non-2xx status
/// * `FetchError::Network` - connection, TLS, or transport failure
pub async fn fetch_page(
    client: &Client,
    url: &str,
    limits: FetchLimits,
) -> Result<FetchedPage, FetchError> {
    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let final_url = response.url().clone();

    let mut buf: Vec<u8> = Vec::with_capacity(limits.max_bytes.min(16 * 1024));
    loop {
        let chunk = match response.chunk().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) => return Err(classify_error(url, e)),
        };

        // Overlap the scan window so a marker split across chunks is found
        let scan_from = buf.len().saturating_sub(8);
        buf.extend_from_slice(&chunk);

        if buf.len() >= limits.max_bytes {
            tracing::debug!(url, bytes = buf.len(), "byte budget reached, truncating read");
            break;
        }

        if limits.stop_after_head && contains_head_end(&buf[scan_from..]) {
            tracing::debug!(url, bytes = buf.len(), "document head complete, stopping read");
            break;
        }
    }

    Ok(FetchedPage {
        final_url,
        status: status.as_u16(),
        body: String::from_utf8_lossy(&buf).into_owned(),
    })
}

fn classify_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}

/// Looks for `</head` (case-insensitive) in the given window
fn contains_head_end(window: &[u8]) -> bool {
    const MARKER: &[u8] = b"</head";
    window
        .windows(MARKER.len())
        .any(|w| w.eq_ignore_ascii_case(MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let config = FetchConfig::default();
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_head_end_marker_found() {
        assert!(contains_head_end(b"<meta></HEAD><body>"));
        assert!(contains_head_end(b"...</head>"));
    }

    #[test]
    fn test_head_end_marker_absent() {
        assert!(!contains_head_end(b"<head><meta charset=utf-8>"));
        assert!(!contains_head_end(b""));
    }

    #[test]
    fn test_limits_constructors() {
        let body = FetchLimits::body(50_000);
        assert_eq!(body.max_bytes, 50_000);
        assert!(!body.stop_after_head);

        let head = FetchLimits::head(100_000);
        assert!(head.stop_after_head);
    }
}
