//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the crawler's user agent and timeout
//! - GET requests to fetch page content
//! - Error classification
//!
//! A failed fetch is never an error for the caller. It is reported as a
//! `FetchResult` variant and the page is simply skipped until the next cycle.

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, unreadable body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns the body of a successful fetch
    pub fn into_body(self) -> Option<String> {
        match self {
            Self::Success { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl fmt::Display for FetchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { status_code, .. } => write!(f, "HTTP {}", status_code),
            Self::HttpError { status_code } => write!(f, "HTTP {}", status_code),
            Self::NetworkError { error } => f.write_str(error),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use contact_harvester::config::{CrawlerConfig, UserAgentConfig};
/// use contact_harvester::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(crawler.fetch_timeout_secs);

    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the result
///
/// | Condition               | Result         |
/// |-------------------------|----------------|
/// | 2xx with readable body  | `Success`      |
/// | any other status        | `HttpError`    |
/// | timeout                 | `NetworkError` |
/// | connection/TLS failure  | `NetworkError` |
/// | body decode failure     | `NetworkError` |
///
/// No retries: a failed fetch waits for the next crawl cycle.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: if e.is_timeout() {
                "Request timeout".to_string()
            } else {
                e.to_string()
            },
        },
    }
}

/// Fetches a URL and returns its HTML, or `None` on any failure
pub async fn fetch_html(client: &Client, url: &str) -> Option<String> {
    let result = fetch_url(client, url).await;
    if !matches!(result, FetchResult::Success { .. }) {
        tracing::debug!("Fetch of {} failed: {}", url, result);
    }
    result.into_body()
}
