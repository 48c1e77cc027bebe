// src/crawl/scope.rs
// =============================================================================
// This module decides which links belong to the site we are crawling.
//
// A crawl is pinned to the "base origin" of the seed URL: its scheme, host
// and port. Every link found on a page is run through `resolve()`, which
// either turns it into an absolute in-scope URL or throws it away.
//
// Accepted:
// - Root-relative links ("/about") joined onto the base origin
// - Absolute links whose origin equals the base origin
//
// Rejected:
// - Other hosts, other schemes, other ports
// - mailto:, javascript:, tel:, data: and friends
// - Fragment-only ("#top") and plain relative ("about.html") links
//
// Rust concepts:
// - Option<T>: `None` means "not part of this crawl"
// - url::Origin: scheme + host + port compared as one value
// =============================================================================

use tracing::debug;
use url::{ParseError, Url};

use super::error::CrawlError;

/// Scheme and network location of the seed URL.
///
/// Computed once per crawl and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseOrigin {
    // Always "<scheme>://<host>[:<port>]/" with no credentials, query or fragment
    root: Url,
}

impl BaseOrigin {
    /// Builds the base origin from a seed URL.
    ///
    /// Only http and https seeds with a host are crawlable.
    pub fn from_seed(seed: &Url) -> Result<Self, CrawlError> {
        if !matches!(seed.scheme(), "http" | "https") {
            return Err(CrawlError::InvalidSeed {
                url: seed.to_string(),
                reason: format!("unsupported scheme '{}'", seed.scheme()),
            });
        }
        if seed.host_str().map_or(true, str::is_empty) {
            return Err(CrawlError::InvalidSeed {
                url: seed.to_string(),
                reason: "missing host".to_string(),
            });
        }

        let mut root = seed.clone();
        root.set_path("/");
        root.set_query(None);
        root.set_fragment(None);
        // Both only fail for URLs that cannot carry credentials, which an
        // http(s) URL with a host always can.
        let _ = root.set_username("");
        let _ = root.set_password(None);

        Ok(Self { root })
    }

    /// The origin as a URL with path "/", e.g. `https://example.com/`
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// True if `url` has exactly the same scheme, host and port.
    pub fn contains(&self, url: &Url) -> bool {
        url.origin() == self.root.origin()
    }
}

impl std::fmt::Display for BaseOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root)
    }
}

// Resolves a raw href found on `page_url` into an in-scope absolute URL
//
// Parameters:
//   href: the raw attribute value, exactly as it appeared in the HTML
//   base: the crawl's base origin
//   page_url: the page the link was found on (used for log context)
//
// Returns: Some(url) if the link belongs to the crawl, None otherwise
//
// Examples (base = "https://example.com/"):
//   "/about"                 -> Some("https://example.com/about")
//   "https://example.com/x"  -> Some("https://example.com/x")
//   "https://other.com/x"    -> None
//   "javascript:void(0)"     -> None
pub fn resolve(href: &str, base: &BaseOrigin, page_url: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let candidate = if href.starts_with('/') {
        match base.root().join(href) {
            Ok(url) => url,
            Err(e) => {
                debug!(page = %page_url, href, error = %e, "skipping malformed root-relative link");
                return None;
            }
        }
    } else {
        match Url::parse(href) {
            Ok(url) => url,
            // "about.html", "#section", "?page=2"
            Err(ParseError::RelativeUrlWithoutBase) => return None,
            Err(e) => {
                debug!(page = %page_url, href, error = %e, "skipping malformed link");
                return None;
            }
        }
    };

    // A protocol-relative "//other.com/x" also starts with '/', so the join
    // above can still land on a foreign host.
    if base.contains(&candidate) {
        Some(candidate)
    } else {
        None
    }
}
