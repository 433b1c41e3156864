//! Listing page walker
//!
//! Follows the pagination "next" control from a seed listing page and
//! gathers article links in discovery order. The walk never fails: a page
//! that cannot be fetched, or that has no usable next link, ends it with
//! whatever was gathered so far.

use crate::config::SelectorSet;
use crate::harvester::fetcher::{fetch_document, Document};
use reqwest::Client;
use scraper::{ElementRef, Selector};
use std::collections::HashSet;
use url::Url;

/// Links gathered by one pagination walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageWalk {
    /// Absolute article URLs; page order, then document order; not deduplicated
    pub links: Vec<String>,

    /// Listing pages successfully fetched
    pub pages_visited: usize,
}

/// Sequence of listing pages, advanced one fetch at a time
///
/// Each call to [`ListingPages::next_page`] fetches the current cursor and
/// moves the cursor to the page's next link. Once the cursor is empty the
/// sequence is exhausted; it cannot be rewound.
pub struct ListingPages<'a> {
    client: &'a Client,
    next_selector: Option<&'a Selector>,
    cursor: Option<Url>,
    seen: HashSet<Url>,
}

impl<'a> ListingPages<'a> {
    pub fn new(client: &'a Client, seed: Url, next_selector: Option<&'a Selector>) -> Self {
        Self {
            client,
            next_selector,
            cursor: Some(seed),
            seen: HashSet::new(),
        }
    }

    /// Fetches the next listing page, or returns `None` when the walk is over
    pub async fn next_page(&mut self) -> Option<Document> {
        let url = self.cursor.take()?;

        if !self.seen.insert(url.clone()) {
            tracing::warn!("Pagination loops back to {}, stopping", url);
            return None;
        }

        let page = match fetch_document(self.client, &url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Stopping pagination at {}: {}", url, e);
                return None;
            }
        };

        self.cursor = self
            .next_selector
            .and_then(|selector| find_next_page(&page, selector));

        match &self.cursor {
            Some(next) => tracing::debug!("Next listing page: {}", next),
            None => tracing::debug!("No next page after {}", url),
        }

        Some(page)
    }
}

/// Walks every reachable listing page starting at `seed`
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `seed` - First listing page
/// * `selectors` - Compiled selectors; `links` and `next_page` are used
///
/// # Returns
///
/// The links in discovery order and the number of pages fetched
pub async fn collect_links(client: &Client, seed: Url, selectors: &SelectorSet) -> PageWalk {
    let mut pages = ListingPages::new(client, seed, selectors.next_page.as_ref());
    let mut walk = PageWalk::default();

    while let Some(page) = pages.next_page().await {
        let found = extract_links(&page, &selectors.links);
        tracing::info!(
            "Listing page {}: {} links from {}",
            walk.pages_visited + 1,
            found.len(),
            page.url()
        );
        walk.links.extend(found);
        walk.pages_visited += 1;
    }

    walk
}

/// Extracts the `href` of every element matching `selector`, in document order
///
/// References that do not resolve to an absolute http(s) URL are skipped.
pub fn extract_links(page: &Document, selector: &Selector) -> Vec<String> {
    page.select(selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| match page.resolve(href) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                tracing::debug!("Skipping link {:?} on {}: {}", href, page.url(), e);
                None
            }
        })
        .collect()
}

/// Locates the next listing page
///
/// The first element matching `icon_selector` is taken as the pagination
/// icon; the nearest anchor enclosing it (or the element itself, if it is an
/// anchor) carries the target. A missing anchor or an unresolvable `href`
/// means there is no next page.
pub fn find_next_page(page: &Document, icon_selector: &Selector) -> Option<Url> {
    let icon = page.select_first(icon_selector)?;
    let anchor = enclosing_anchor(icon)?;
    let href = anchor.value().attr("href")?;

    match page.resolve(href) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!("Malformed next link {:?} on {}: {}", href, page.url(), e);
            None
        }
    }
}

fn enclosing_anchor(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .find(|el| el.value().name() == "a")
}
