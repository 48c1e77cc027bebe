// src/crawl/results.rs
// =============================================================================
// The crawl result: for each visited page, the in-scope links found on it.
//
// BTreeMap/BTreeSet keep everything sorted, so the output file and the
// terminal listing come out in a stable order no matter which worker got
// to a page first.
// =============================================================================

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use url::Url;

/// Page URL -> links found on that page, as plain strings.
pub type LinkMap = BTreeMap<String, BTreeSet<String>>;

#[derive(Debug, Default)]
pub struct ResultStore {
    pages: Mutex<BTreeMap<Url, BTreeSet<Url>>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<Url, BTreeSet<Url>>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates an empty entry for `page` if it has none yet.
    pub fn ensure_page(&self, page: &Url) {
        self.lock().entry(page.clone()).or_default();
    }

    /// Records that `page` links to `link`.
    ///
    /// Returns true if the edge was new.
    pub fn record_link(&self, page: &Url, link: Url) -> bool {
        self.lock().entry(page.clone()).or_default().insert(link)
    }

    pub fn page_count(&self) -> usize {
        self.lock().len()
    }

    pub fn contains_page(&self, page: &Url) -> bool {
        self.lock().contains_key(page)
    }

    /// Copies the current contents out as strings.
    pub fn snapshot(&self) -> LinkMap {
        self.lock()
            .iter()
            .map(|(page, links)| {
                (
                    page.to_string(),
                    links.iter().map(Url::to_string).collect(),
                )
            })
            .collect()
    }
}
