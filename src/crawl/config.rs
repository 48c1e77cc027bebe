// src/crawl/config.rs
// =============================================================================
// Crawl-wide settings.
//
// Everything here is fixed for the lifetime of one crawl. The CLI builds a
// `CrawlConfig` from its flags; tests usually start from
// `CrawlConfig::default()` and zero out the delays.
// =============================================================================

use std::time::Duration;

/// Which elements the link extractor looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkMode {
    /// Only `<a href>`
    #[default]
    Anchors,
    /// Any element with an `href` or `src` attribute
    All,
}

/// When a worker decides there is nothing left to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Termination {
    /// Stop only once the frontier is empty AND no worker is mid-page.
    #[default]
    Quiescence,
    /// Stop as soon as the frontier looks empty. A worker still parsing a
    /// page may enqueue more work after its siblings have already left.
    BestEffort,
}

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Number of concurrent workers (at least 1)
    pub workers: usize,
    /// Timeout for a single HTTP request
    pub request_timeout: Duration,
    /// Extra attempts after the first one, for transient failures only
    pub max_retries: u32,
    /// Retry n waits `backoff_factor * 2^(n-1)` seconds
    pub backoff_factor: f64,
    /// Pause each worker takes after every page
    pub politeness_delay: Duration,
    /// How long the first worker runs alone before the rest start
    pub startup_delay: Duration,
    pub max_redirects: usize,
    pub link_mode: LinkMode,
    pub termination: Termination,
    pub user_agent: String,
}

const DEFAULT_WORKERS: usize = 5;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);
const DEFAULT_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_FACTOR: f64 = 1.0;
const DEFAULT_POLITENESS_DELAY: Duration = Duration::from_secs(1);

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            request_timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_RETRIES,
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
            politeness_delay: DEFAULT_POLITENESS_DELAY,
            // Give the seed page one full request timeout to be processed
            startup_delay: DEFAULT_TIMEOUT,
            max_redirects: 10,
            link_mode: LinkMode::default(),
            termination: Termination::default(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}
