// src/crawl/frontier.rs
// =============================================================================
// The frontier: every URL we have discovered but not fetched yet.
//
// The frontier, the set of URLs ever scheduled and the set of URLs already
// visited all live behind ONE mutex. That is what makes "take the next URL
// and mark it visited" a single step, so two workers can never both fetch
// the same page.
//
// Idle workers don't poll. They wait on a `Notify` that is poked whenever
// a URL is enqueued or a worker finishes a page (which might mean the
// crawl is done).
//
// Rust concepts:
// - Mutex<T>: the data is only reachable through the lock guard
// - Notify: an async "wake up and look again" signal
// - Drop: a `Claim` releases itself even if the worker panics
// =============================================================================

use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use super::config::Termination;

#[derive(Debug, Default)]
struct FrontierState {
    queue: VecDeque<Url>,
    scheduled: HashSet<Url>,
    visited: HashSet<Url>,
    // URLs claimed by a worker and not yet released
    in_flight: usize,
}

enum ClaimAttempt {
    Claimed(Url),
    Wait,
    Exhausted,
}

/// Shared work queue plus visited-tracking for one crawl.
#[derive(Debug, Default)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    wakeup: Notify,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    // A worker that panicked while holding the lock can't leave the sets
    // half-updated (every critical section is a handful of inserts), so
    // keep going with whatever is inside.
    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Schedules `url` unless it was ever scheduled before.
    ///
    /// Returns true if the URL was newly added to the queue.
    pub fn enqueue_if_new(&self, url: Url) -> bool {
        let added = {
            let mut state = self.lock();
            if state.scheduled.insert(url.clone()) {
                state.queue.push_back(url);
                true
            } else {
                false
            }
        };
        if added {
            self.wakeup.notify_waiters();
        }
        added
    }

    /// Removes the oldest queued URL without marking it visited.
    pub fn dequeue(&self) -> Option<Url> {
        self.lock().queue.pop_front()
    }

    /// Number of URLs waiting in the queue.
    pub fn size(&self) -> usize {
        self.lock().queue.len()
    }

    pub fn scheduled_count(&self) -> usize {
        self.lock().scheduled.len()
    }

    pub fn visited_count(&self) -> usize {
        self.lock().visited.len()
    }

    pub fn is_scheduled(&self, url: &Url) -> bool {
        self.lock().scheduled.contains(url)
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.lock().visited.contains(url)
    }

    /// Records a URL as fetched without going through the queue.
    ///
    /// Used for redirect targets: the page we actually received must not
    /// be fetched again if some other page links to it. Returns false if
    /// the URL had already been visited.
    pub fn mark_visited(&self, url: &Url) -> bool {
        let mut state = self.lock();
        state.scheduled.insert(url.clone());
        state.visited.insert(url.clone())
    }

    fn try_claim(&self, termination: Termination) -> ClaimAttempt {
        let mut state = self.lock();

        while let Some(url) = state.queue.pop_front() {
            if state.visited.insert(url.clone()) {
                state.in_flight += 1;
                return ClaimAttempt::Claimed(url);
            }
            debug!(url = %url, "already visited, skipping");
        }

        match termination {
            Termination::BestEffort => ClaimAttempt::Exhausted,
            Termination::Quiescence if state.in_flight == 0 => ClaimAttempt::Exhausted,
            Termination::Quiescence => ClaimAttempt::Wait,
        }
    }

    /// Takes the next unvisited URL and marks it visited in one step.
    ///
    /// Returns None when the crawl is over for this worker:
    /// - `BestEffort`: the queue was empty when we looked
    /// - `Quiescence`: the queue is empty and no other claim is in flight
    /// - the token was cancelled while waiting
    pub async fn claim(
        &self,
        termination: Termination,
        cancel: &CancellationToken,
    ) -> Option<Claim<'_>> {
        loop {
            // Register interest before looking at the queue, otherwise an
            // enqueue between the check and the await would be missed.
            let notified = self.wakeup.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            match self.try_claim(termination) {
                ClaimAttempt::Claimed(url) => {
                    return Some(Claim {
                        frontier: self,
                        url,
                    })
                }
                ClaimAttempt::Exhausted => return None,
                ClaimAttempt::Wait => {}
            }

            tokio::select! {
                _ = notified.as_mut() => {}
                _ = cancel.cancelled() => return None,
            }
        }
    }

    fn release(&self) {
        {
            let mut state = self.lock();
            state.in_flight = state.in_flight.saturating_sub(1);
        }
        self.wakeup.notify_waiters();
    }
}

/// A URL a worker is currently processing.
///
/// Dropping the claim tells the frontier the worker is done with it.
#[derive(Debug)]
pub struct Claim<'a> {
    frontier: &'a Frontier,
    url: Url,
}

impl Claim<'_> {
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        self.frontier.release();
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why one lock for three collections?
//    - "Is it visited?" and "mark it visited" must happen together
//    - With two locks, two workers could both see "not visited" and both
//      fetch the page
//
// 2. What does enable() do on a Notified future?
//    - Futures are lazy; a Notified that hasn't been polled isn't
//      listening yet
//    - enable() starts listening right away, so a notify_waiters() that
//      happens before we reach .await still wakes us
//
// 3. Why is Claim<'a> borrowing the frontier?
//    - It ties the claim's lifetime to the frontier it came from
//    - Its Drop impl decrements the in-flight counter, so forgetting to
//      "release" a URL is impossible
// -----------------------------------------------------------------------------
