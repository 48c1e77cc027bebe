// src/crawl/state.rs
// =============================================================================
// Everything the workers of one crawl share.
//
// A `CrawlState` is created at the start of `Crawler::run` and dropped when
// the crawl returns, so two crawls in the same process never see each
// other's queues or results.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

use super::frontier::Frontier;
use super::results::{LinkMap, ResultStore};
use super::scope::BaseOrigin;

#[derive(Debug)]
pub struct CrawlState {
    pub base: BaseOrigin,
    pub frontier: Frontier,
    pub results: ResultStore,
    pub(crate) counters: Counters,
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub pages_fetched: AtomicUsize,
    pub fetch_failures: AtomicUsize,
    pub links_recorded: AtomicUsize,
}

impl Counters {
    pub fn page_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fetch_failed(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn link_recorded(&self) {
        self.links_recorded.fetch_add(1, Ordering::Relaxed);
    }
}

/// Totals for a finished crawl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    pub pages_fetched: usize,
    pub fetch_failures: usize,
    pub links_recorded: usize,
    /// URLs that were taken off the frontier (fetched or attempted)
    pub urls_visited: usize,
}

/// What a crawl hands back to its caller.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub pages: LinkMap,
    pub stats: CrawlStats,
    /// True if the crawl was stopped before running out of work
    pub cancelled: bool,
}

impl CrawlState {
    pub fn new(base: BaseOrigin) -> Self {
        Self {
            base,
            frontier: Frontier::new(),
            results: ResultStore::new(),
            counters: Counters::default(),
        }
    }

    pub fn stats(&self) -> CrawlStats {
        CrawlStats {
            pages_fetched: self.counters.pages_fetched.load(Ordering::Relaxed),
            fetch_failures: self.counters.fetch_failures.load(Ordering::Relaxed),
            links_recorded: self.counters.links_recorded.load(Ordering::Relaxed),
            urls_visited: self.frontier.visited_count(),
        }
    }

    pub fn report(&self, cancelled: bool) -> CrawlReport {
        CrawlReport {
            pages: self.results.snapshot(),
            stats: self.stats(),
            cancelled,
        }
    }
}
