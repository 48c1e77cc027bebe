// src/crawl/error.rs
// =============================================================================
// Errors that stop a crawl before it starts.
//
// Anything that goes wrong while a crawl is running (a page times out, a
// link is malformed) is handled inside the worker that hit it and never
// shows up here.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// The seed URL cannot be crawled
    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    /// The HTTP client could not be constructed (TLS backend, bad settings)
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
