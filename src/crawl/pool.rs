// src/crawl/pool.rs
// =============================================================================
// The worker pool: N workers crawling one site breadth-first.
//
// Each worker loops:
// 1. Claim the next URL from the frontier (marks it visited)
// 2. Fetch the page
// 3. Extract the raw links from its HTML
// 4. Resolve each link against the base origin; record in-scope ones in the
//    result store and schedule the new ones
// 5. Sleep for the politeness delay, then go again
//
// A worker stops when the frontier tells it there is no more work (see
// `Termination`) or when the crawl is cancelled.
//
// Politeness:
// - Every worker pauses after each page
// - The first worker runs alone for `startup_delay` so the seed page can
//   fill the frontier before the others start looking at it
//
// Rust concepts:
// - tokio::spawn: each worker is its own task
// - Arc: the state, fetcher and config are shared by all workers
// - Generics: the pool works with any `PageFetcher`
// =============================================================================

use std::sync::Arc;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace, warn};
use url::Url;

use super::config::CrawlConfig;
use super::scope::resolve;
use super::state::CrawlState;
use crate::page::{extract_links, PageFetcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Fetching,
    Extracting,
    Updating,
    Stopped,
}

struct Worker<F> {
    id: usize,
    phase: Phase,
    state: Arc<CrawlState>,
    fetcher: Arc<F>,
    config: Arc<CrawlConfig>,
    cancel: CancellationToken,
}

impl<F: PageFetcher> Worker<F> {
    fn enter(&mut self, phase: Phase) {
        trace!(worker = self.id, from = ?self.phase, to = ?phase, "worker phase");
        self.phase = phase;
    }

    async fn run(mut self) {
        debug!(worker = self.id, base = %self.state.base, "starting worker");
        let shared = Arc::clone(&self.state);

        while !self.cancel.is_cancelled() {
            let Some(claim) = shared
                .frontier
                .claim(self.config.termination, &self.cancel)
                .await
            else {
                break;
            };

            self.process(claim.url()).await;
            // Release before sleeping so idle siblings can see quiescence
            drop(claim);
            self.enter(Phase::Idle);

            if !self.config.politeness_delay.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(self.config.politeness_delay) => {}
                    _ = self.cancel.cancelled() => break,
                }
            }
        }

        self.enter(Phase::Stopped);
        debug!(worker = self.id, "ending worker");
    }

    // One fetch/extract/update cycle. Every failure stays in here.
    async fn process(&mut self, url: &Url) {
        self.enter(Phase::Fetching);
        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                self.state.counters.fetch_failed();
                if e.is_transient() {
                    warn!(worker = self.id, url = %url, error = %e, "giving up on page after retries");
                } else {
                    warn!(worker = self.id, url = %url, error = %e, "failed to fetch page");
                }
                return;
            }
        };
        self.state.counters.page_fetched();

        // Redirects decide which URL the links were really found on
        let page_url = page.url;
        if &page_url != url {
            if !self.state.base.contains(&page_url) {
                debug!(worker = self.id, url = %url, target = %page_url, "redirected off-site, ignoring");
                return;
            }
            if !self.state.frontier.mark_visited(&page_url) {
                debug!(worker = self.id, url = %url, target = %page_url, "redirect target already visited");
                return;
            }
        }
        self.state.results.ensure_page(&page_url);

        self.enter(Phase::Extracting);
        let links = extract_links(&page.body, self.config.link_mode);
        debug!(worker = self.id, url = %page_url, candidates = links.len(), "extracted links");

        self.enter(Phase::Updating);
        for href in links {
            let Some(link) = resolve(&href, &self.state.base, &page_url) else {
                continue;
            };
            if self.state.results.record_link(&page_url, link.clone()) {
                self.state.counters.link_recorded();
            }
            if self.state.frontier.enqueue_if_new(link.clone()) {
                trace!(worker = self.id, url = %link, "scheduled");
            }
        }
    }
}

/// Runs the worker pool until every worker has stopped.
pub(crate) async fn run_workers<F>(
    state: Arc<CrawlState>,
    fetcher: Arc<F>,
    config: Arc<CrawlConfig>,
    cancel: CancellationToken,
) where
    F: PageFetcher + 'static,
{
    let count = config.workers.max(1);
    let spawn_worker = |id: usize| {
        let worker = Worker {
            id,
            phase: Phase::Idle,
            state: Arc::clone(&state),
            fetcher: Arc::clone(&fetcher),
            config: Arc::clone(&config),
            cancel: cancel.clone(),
        };
        tokio::spawn(worker.run())
    };

    let mut handles = Vec::with_capacity(count);
    handles.push(spawn_worker(0));

    if count > 1 {
        if !config.startup_delay.is_zero() {
            debug!(delay = ?config.startup_delay, "waiting for the seed page before starting the other workers");
            tokio::select! {
                _ = tokio::time::sleep(config.startup_delay) => {}
                _ = cancel.cancelled() => {}
            }
        }
        handles.extend((1..count).map(spawn_worker));
    }

    for (id, result) in join_all(handles).await.into_iter().enumerate() {
        if let Err(e) = result {
            error!(worker = id, error = %e, "worker task failed");
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does the claim get dropped before the politeness sleep?
//    - While a claim is alive the frontier counts the page as in flight
//    - Idle workers waiting for quiescence would otherwise wait out our nap
//
// 2. What does tokio::select! do here?
//    - It waits on several futures and runs the branch of whichever is
//      ready first
//    - A cancelled crawl stops sleeping right away instead of finishing
//      the delay
//
// 3. Why join_all instead of awaiting each handle in a loop?
//    - Same result, but every JoinHandle is polled together and we get
//      back one Vec of results to log
// -----------------------------------------------------------------------------
