// src/page/html.rs
// =============================================================================
// This module pulls raw link targets out of HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, which never rejects a document; broken markup
//   is repaired the same way a browser would
//
// Nothing here decides whether a link is worth following. The strings come
// out exactly as written in the page and the scope resolver takes it from
// there.
// =============================================================================

use scraper::{Html, Selector};

use crate::crawl::LinkMode;

// Attributes that can point at another resource in `LinkMode::All`
static LINK_ATTRIBUTES: [&str; 2] = ["href", "src"];

// Extracts all raw link targets from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   mode: anchors only, or every element with a link-bearing attribute
//
// Returns: Vec<String> of unresolved attribute values, in document order
//
// Example:
//   html = "<a href='/docs'>Docs</a><img src='/logo.png'>"
//   Anchors -> ["/docs"]
//   All     -> ["/docs", "/logo.png"]
pub fn extract_links(html: &str, mode: LinkMode) -> Vec<String> {
    let document = Html::parse_document(html);

    match mode {
        LinkMode::Anchors => {
            // Our selector is a constant and known to be valid
            let selector = Selector::parse("a[href]").expect("valid anchor selector");
            document
                .select(&selector)
                .filter_map(|element| element.value().attr("href"))
                .map(str::to_string)
                .collect()
        }
        LinkMode::All => {
            let selector = Selector::parse("[href], [src]").expect("valid link selector");
            document
                .select(&selector)
                .flat_map(|element| {
                    LINK_ATTRIBUTES
                        .iter()
                        .filter_map(move |attr| element.value().attr(attr))
                })
                .map(str::to_string)
                .collect()
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is it OK to call expect() on Selector::parse here?
//    - The selector strings are fixed in the source code
//    - If one were wrong every test would fail, so it can't slip into a release
//
// 2. Why return Vec<String> and not Vec<Url>?
//    - Turning an href into a URL needs the page and the base origin
//    - Keeping that in crawl/scope.rs means this module only knows about HTML
//
// 3. What does flat_map do?
//    - For each element it yields zero, one or two attribute values
//    - flat_map joins all of those into one flat list
// -----------------------------------------------------------------------------
