// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Same-origin restriction (doesn't crawl external sites)
// - A pool of concurrent workers sharing one frontier
// - Each URL fetched at most once
// - Polite crawling with a delay after every page
//
// Submodules:
// - scope: which links belong to the crawl
// - frontier: the shared queue + visited set
// - results: page -> links found on it
// - pool: the workers
// - crawler: `Crawler`, the entry point tying it all together
// =============================================================================

mod config;
mod crawler;
mod error;
mod frontier;
mod pool;
mod results;
mod scope;
mod state;

#[cfg(test)]
mod testing;

// Re-export the public API so callers can write `crawl::Crawler`
pub use config::{CrawlConfig, LinkMode, Termination};
pub use crawler::{validate_seed, Crawler};
pub use error::CrawlError;
pub use frontier::{Claim, Frontier};
pub use results::{LinkMap, ResultStore};
pub use scope::{resolve, BaseOrigin};
pub use state::{CrawlReport, CrawlState, CrawlStats};
