// src/crawl/crawler.rs
// =============================================================================
// The public face of the crawl engine.
//
//   let seed = validate_seed("https://example.com")?;
//   let crawler = Crawler::new(CrawlConfig::default())?;
//   let report = crawler.run(&seed, CancellationToken::new()).await?;
//
// Each call to `run` builds a fresh `CrawlState`, seeds it, runs the
// worker pool to completion and returns the collected links.
// =============================================================================

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;
use url::Url;

use super::config::CrawlConfig;
use super::error::CrawlError;
use super::pool::run_workers;
use super::scope::BaseOrigin;
use super::state::{CrawlReport, CrawlState};
use crate::page::{HttpFetcher, PageFetcher};

/// Checks that `input` is a URL we can start a crawl from.
///
/// It must parse, use http or https, and name a host.
pub fn validate_seed(input: &str) -> Result<Url, CrawlError> {
    let url = Url::parse(input.trim()).map_err(|e| CrawlError::InvalidSeed {
        url: input.to_string(),
        reason: e.to_string(),
    })?;
    BaseOrigin::from_seed(&url)?;
    Ok(url)
}

pub struct Crawler<F = HttpFetcher> {
    config: Arc<CrawlConfig>,
    fetcher: Arc<F>,
}

impl Crawler<HttpFetcher> {
    /// A crawler that fetches pages over HTTP.
    pub fn new(config: CrawlConfig) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }
}

impl<F: PageFetcher + 'static> Crawler<F> {
    pub fn with_fetcher(config: CrawlConfig, fetcher: Arc<F>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls every page reachable from `seed` on the seed's origin.
    ///
    /// Cancelling `cancel` stops the workers after their current page; the
    /// links collected so far are still returned.
    pub async fn run(
        &self,
        seed: &Url,
        cancel: CancellationToken,
    ) -> Result<CrawlReport, CrawlError> {
        let base = BaseOrigin::from_seed(seed)?;
        // The seed is scheduled in the same form links resolve to
        let mut seed = seed.clone();
        seed.set_fragment(None);
        let _ = seed.set_username("");
        let _ = seed.set_password(None);

        info!(
            url = %seed,
            base = %base,
            workers = self.config.workers,
            mode = ?self.config.link_mode,
            termination = ?self.config.termination,
            "starting crawl"
        );

        let state = Arc::new(CrawlState::new(base));
        state.frontier.enqueue_if_new(seed);

        run_workers(
            Arc::clone(&state),
            Arc::clone(&self.fetcher),
            Arc::clone(&self.config),
            cancel.clone(),
        )
        .await;

        let report = state.report(cancel.is_cancelled());
        info!(
            pages = report.pages.len(),
            fetched = report.stats.pages_fetched,
            failed = report.stats.fetch_failures,
            links = report.stats.links_recorded,
            cancelled = report.cancelled,
            "crawl finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::testing::{fast_config, FakeSite};
    use std::collections::BTreeSet;

    #[test]
    fn test_validate_seed_accepts_http_urls() {
        assert!(validate_seed("https://example.com").is_ok());
        assert!(validate_seed("http://localhost:8080/start").is_ok());
        assert!(validate_seed("  https://example.com/about  ").is_ok());
    }

    #[test]
    fn test_validate_seed_rejects_garbage() {
        for input in ["", "not a url", "example.com", "ftp://example.com/", "mailto:x@y.z"] {
            let err = validate_seed(input).unwrap_err();
            assert!(matches!(err, CrawlError::InvalidSeed { .. }), "{input}");
        }
    }

    #[tokio::test]
    async fn test_run_end_to_end() {
        let site = Arc::new(FakeSite::new().page(
            "https://a.test/",
            r#"<a href="/b">b</a><a href="https://other.test/c">c</a>"#,
        ));
        let crawler = Crawler::with_fetcher(fast_config(2), Arc::clone(&site));
        let seed = validate_seed("https://a.test/").unwrap();

        let report = crawler.run(&seed, CancellationToken::new()).await.unwrap();

        let expected: BTreeSet<String> = ["https://a.test/b".to_string()].into();
        assert_eq!(report.pages.len(), 1);
        assert_eq!(report.pages["https://a.test/"], expected);
        assert_eq!(report.stats.urls_visited, 2);
        assert!(!report.cancelled);
    }

    #[tokio::test]
    async fn test_independent_crawls_share_nothing() {
        let site = Arc::new(
            FakeSite::new()
                .page("https://a.test/", r#"<a href="/b">b</a>"#)
                .page("https://a.test/b", ""),
        );
        let crawler = Crawler::with_fetcher(fast_config(1), Arc::clone(&site));
        let seed = validate_seed("https://a.test/").unwrap();

        let first = crawler.run(&seed, CancellationToken::new()).await.unwrap();
        let second = crawler.run(&seed, CancellationToken::new()).await.unwrap();

        assert_eq!(first.pages, second.pages);
        assert_eq!(site.fetch_count("https://a.test/"), 2);
    }

    #[tokio::test]
    async fn test_seed_fragment_is_dropped() {
        let site = Arc::new(FakeSite::new().page("https://a.test/", ""));
        let crawler = Crawler::with_fetcher(fast_config(1), Arc::clone(&site));
        let seed = validate_seed("https://a.test/#top").unwrap();

        let report = crawler.run(&seed, CancellationToken::new()).await.unwrap();

        assert!(report.pages.contains_key("https://a.test/"));
    }

    #[tokio::test]
    async fn test_seed_credentials_are_dropped() {
        let site = Arc::new(FakeSite::new().page("https://a.test/", r#"<a href="/">home</a>"#));
        let crawler = Crawler::with_fetcher(fast_config(2), Arc::clone(&site));
        let seed = validate_seed("https://user:pw@a.test/").unwrap();

        let report = crawler.run(&seed, CancellationToken::new()).await.unwrap();

        let keys: Vec<_> = report.pages.keys().cloned().collect();
        assert_eq!(keys, vec!["https://a.test/"]);
        assert_eq!(report.pages["https://a.test/"], BTreeSet::from(["https://a.test/".to_string()]));
        assert_eq!(site.fetch_count("https://a.test/"), 1);
    }
}
