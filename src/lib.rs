// src/lib.rs
// =============================================================================
// site-crawler: crawl every page of one website and record the links found
// on each page.
//
// Modules:
// - crawl: the crawl engine (scope rules, frontier, workers, results)
// - page: fetching a page over HTTP and extracting links from its HTML
// - report: writing the result to a file and to the terminal
// =============================================================================

pub mod crawl;
pub mod page;
pub mod report;

pub use crawl::{validate_seed, CrawlConfig, CrawlError, CrawlReport, Crawler, LinkMode, Termination};
