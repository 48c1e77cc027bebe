// src/page/http.rs
// =============================================================================
// This module downloads pages for the crawler.
//
// Key functionality:
// - Makes HTTP GET requests with a per-request timeout
// - Follows redirects and reports the URL we actually ended up on
// - Retries transient failures (timeouts, connection errors, 5xx) with
//   exponential backoff
// - Never retries 4xx responses: the page is simply not there
//
// The worker pool only ever talks to the `PageFetcher` trait, so tests can
// swap the network for an in-memory site.
//
// Rust concepts:
// - async-trait: async methods behind a trait object / generic bound
// - thiserror: one enum describing every way a fetch can fail
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{redirect, Client};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::crawl::CrawlConfig;

/// A fetched document, ready for link extraction.
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after redirects
    pub url: Url,
    pub body: String,
}

/// Why a page could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    ConnectionFailure(String),

    #[error("HTTP {0}")]
    HttpStatus(u16),

    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// True for failures that may go away if we ask again.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Timeout | FetchError::ConnectionFailure(_) => true,
            FetchError::HttpStatus(code) => *code >= 500,
            FetchError::Other(_) => false,
        }
    }
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError>;
}

/// Longest single wait between two attempts.
pub const MAX_BACKOFF: Duration = Duration::from_secs(120);

/// How often and how patiently to retry transient failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Extra attempts after the first one
    pub max_retries: u32,
    /// Retry n waits `backoff_factor * 2^(n-1)` seconds
    pub backoff_factor: f64,
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based).
    pub fn delay(&self, retry: u32) -> Duration {
        if retry == 0 || self.backoff_factor <= 0.0 {
            return Duration::ZERO;
        }
        let exponent = (retry - 1).min(16) as i32;
        Duration::try_from_secs_f64(self.backoff_factor * 2f64.powi(exponent))
            .unwrap_or(Duration::MAX)
            .min(MAX_BACKOFF)
    }
}

/// The real fetcher, backed by a pooled reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    retry: RetryPolicy,
}

impl HttpFetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self, reqwest::Error> {
        // One client per crawl: all workers share its connection pool
        let client = Client::builder()
            .timeout(config.request_timeout)
            .redirect(redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            retry: RetryPolicy {
                max_retries: config.max_retries,
                backoff_factor: config.backoff_factor,
            },
        })
    }

    async fn fetch_once(&self, url: &Url) -> Result<Page, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let final_url = response.url().clone();
        let body = response.text().await.map_err(classify_error)?;

        Ok(Page {
            url: final_url,
            body,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError> {
        let mut retry = 0;
        loop {
            match self.fetch_once(url).await {
                Ok(page) => return Ok(page),
                Err(e) if e.is_transient() && retry < self.retry.max_retries => {
                    retry += 1;
                    let delay = self.retry.delay(retry);
                    debug!(url = %url, error = %e, retry, ?delay, "transient failure, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

// Maps reqwest's error flags onto our smaller set of kinds
fn classify_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::ConnectionFailure(error.to_string())
    } else if error.is_redirect() {
        FetchError::Other("too many redirects".to_string())
    } else {
        FetchError::Other(error.to_string())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is #[async_trait]?
//    - It lets a trait have async fn methods that work behind Arc<F>
//    - The crawler can then use HttpFetcher in production and a fake in tests
//
// 2. Why only retry some errors?
//    - A timeout or a 503 may work a second later
//    - A 404 will still be a 404, so asking again only costs time
//
// 3. Why Duration::try_from_secs_f64?
//    - from_secs_f64 panics on values too big for a Duration
//    - The try_ version returns an error we can turn into MAX_BACKOFF
// -----------------------------------------------------------------------------
