// src/page/mod.rs
// =============================================================================
// This module deals with single pages: getting them and reading them.
//
// Submodules:
// - http: Downloads a page (timeouts, redirects, retries)
// - html: Extracts raw link targets from a downloaded page
// =============================================================================

mod html;
mod http;

pub use html::extract_links;
pub use http::{FetchError, HttpFetcher, Page, PageFetcher, RetryPolicy};
