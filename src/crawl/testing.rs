// src/crawl/testing.rs
// =============================================================================
// In-memory website used by the crawl engine's tests.
//
// `FakeSite` implements `PageFetcher`, so the pool and the crawler can be
// driven without a network. Besides serving canned pages it records:
// - how often each URL was fetched (at-most-once checks)
// - when each fetch started (politeness checks)
// - when two fetches first ran at the same time (startup stagger checks)
// =============================================================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use url::Url;

use super::config::CrawlConfig;
use crate::page::{FetchError, Page, PageFetcher};

enum FakePage {
    Html(String),
    Redirect { to: Url, body: String },
    Fail(FetchError),
}

/// Serves canned pages and counts how often each URL was requested.
/// Unknown URLs answer 404.
#[derive(Default)]
pub(crate) struct FakeSite {
    pages: HashMap<Url, FakePage>,
    fetches: Mutex<HashMap<Url, usize>>,
    latency: Duration,
    started: Mutex<Vec<Instant>>,
    in_flight: AtomicUsize,
    first_overlap: Mutex<Option<Instant>>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages
            .insert(Url::parse(url).unwrap(), FakePage::Html(html.to_string()));
        self
    }

    pub fn redirect(mut self, from: &str, to: &str, html: &str) -> Self {
        self.pages.insert(
            Url::parse(from).unwrap(),
            FakePage::Redirect {
                to: Url::parse(to).unwrap(),
                body: html.to_string(),
            },
        );
        self
    }

    pub fn failing(mut self, url: &str, error: FetchError) -> Self {
        self.pages.insert(Url::parse(url).unwrap(), FakePage::Fail(error));
        self
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        let url = Url::parse(url).unwrap();
        self.fetches.lock().unwrap().get(&url).copied().unwrap_or(0)
    }

    pub fn max_fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().values().copied().max().unwrap_or(0)
    }

    /// Start time of every fetch, in order.
    pub fn fetch_starts(&self) -> Vec<Instant> {
        self.started.lock().unwrap().clone()
    }

    /// When a second fetch first started while another was still running.
    pub fn first_overlap(&self) -> Option<Instant> {
        *self.first_overlap.lock().unwrap()
    }
}

#[async_trait]
impl PageFetcher for FakeSite {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError> {
        *self.fetches.lock().unwrap().entry(url.clone()).or_default() += 1;
        let now = Instant::now();
        self.started.lock().unwrap().push(now);
        if self.in_flight.fetch_add(1, Ordering::SeqCst) > 0 {
            self.first_overlap.lock().unwrap().get_or_insert(now);
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.pages.get(url) {
            Some(FakePage::Html(body)) => Ok(Page {
                url: url.clone(),
                body: body.clone(),
            }),
            Some(FakePage::Redirect { to, body }) => Ok(Page {
                url: to.clone(),
                body: body.clone(),
            }),
            Some(FakePage::Fail(error)) => Err(error.clone()),
            None => Err(FetchError::HttpStatus(404)),
        }
    }
}

/// Default config with every delay removed.
pub(crate) fn fast_config(workers: usize) -> CrawlConfig {
    CrawlConfig {
        workers,
        politeness_delay: Duration::ZERO,
        startup_delay: Duration::ZERO,
        backoff_factor: 0.0,
        ..CrawlConfig::default()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a fake instead of a real HTTP server?
//    - The pool only needs something that implements PageFetcher
//    - A HashMap of pages is fast and fully deterministic
//    - tests/http_crawl.rs still covers the real reqwest path
//
// 2. Why Mutex and AtomicUsize inside a struct shared through Arc?
//    - fetch() takes &self, but several workers call it at once
//    - Interior mutability lets them update the counters safely
//
// 3. Why tokio::time::Instant instead of std::time::Instant?
//    - It is the clock tokio::time::sleep uses, so timings compare cleanly
// -----------------------------------------------------------------------------
