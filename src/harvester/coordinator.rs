//! Harvest coordinator - main orchestration logic
//!
//! This module ties the pipeline together:
//! - Walking the listing pages to build the ordered link list
//! - Fetching each article and extracting its item
//! - Handing the ordered items to the feed writer
//!
//! Failures of individual pages and articles are logged and skipped. Only
//! configuration and feed assembly errors are returned to the caller.

use crate::config::{Config, SelectorSet};
use crate::feed::{write_rss, Channel, FeedItem};
use crate::harvester::extractor::extract_item;
use crate::harvester::fetcher::{build_http_client, fetch_document};
use crate::harvester::paginator::{collect_links, PageWalk};
use crate::url::parse_absolute;
use crate::HarvestError;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::time::Instant;
use url::Url;

/// Outcome of one harvest run
#[derive(Debug, Clone, Default)]
pub struct HarvestReport {
    /// Article links in discovery order
    pub links: Vec<String>,

    /// Items in link order; links that failed have no item
    pub items: Vec<FeedItem>,

    pub pages_visited: usize,
    pub articles_failed: usize,
}

/// Main harvester structure
pub struct Harvester {
    config: Config,
    selectors: SelectorSet,
    client: Client,
    seed: Url,
}

impl Harvester {
    /// Creates a harvester with a client built from the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Ready to run
    /// * `Err(HarvestError)` - Invalid seed URL, selector, or client settings
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.http)?;
        Self::with_client(config, client)
    }

    /// Creates a harvester that sends its requests through `client`
    pub fn with_client(config: Config, client: Client) -> Result<Self, HarvestError> {
        let selectors = SelectorSet::compile(&config.selectors)?;
        let seed = parse_absolute(&config.feed.seed_url)?;

        Ok(Self {
            config,
            selectors,
            client,
            seed,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Channel metadata for the generated feed
    pub fn channel(&self) -> Channel {
        Channel::from(&self.config.feed)
    }

    /// Walks the listing pages from the seed
    pub async fn collect_links(&self) -> PageWalk {
        collect_links(&self.client, self.seed.clone(), &self.selectors).await
    }

    /// Fetches and extracts every link, preserving link order
    ///
    /// Up to `http.concurrency` articles are in flight at once; results are
    /// collected by position, so order never depends on completion time.
    pub async fn harvest_items(&self, links: &[String]) -> Vec<Option<FeedItem>> {
        let width = self.config.http.concurrency.max(1);

        stream::iter(links)
            .map(|link| self.harvest_article(link))
            .buffered(width)
            .collect()
            .await
    }

    /// Fetches one article and extracts its item; `None` if it could not be fetched
    pub async fn harvest_article(&self, link: &str) -> Option<FeedItem> {
        let url = match parse_absolute(link) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Skipping article {:?}: {}", link, e);
                return None;
            }
        };

        match fetch_document(&self.client, &url).await {
            Ok(doc) => Some(extract_item(&self.client, doc, &self.selectors).await),
            Err(e) => {
                tracing::warn!("Skipping article {}: {}", url, e);
                None
            }
        }
    }

    /// Runs the full pipeline: pagination, then per-article extraction
    pub async fn run(&self) -> HarvestReport {
        let start_time = Instant::now();
        tracing::info!("Starting harvest from {}", self.seed);

        let walk = self.collect_links().await;
        tracing::info!(
            "Pagination finished: {} links from {} pages",
            walk.links.len(),
            walk.pages_visited
        );

        let results = self.harvest_items(&walk.links).await;
        let articles_failed = results.iter().filter(|r| r.is_none()).count();
        let items: Vec<FeedItem> = results.into_iter().flatten().collect();

        tracing::info!(
            "Harvest completed: {} items, {} articles failed, in {:?}",
            items.len(),
            articles_failed,
            start_time.elapsed()
        );

        HarvestReport {
            links: walk.links,
            items,
            pages_visited: walk.pages_visited,
            articles_failed,
        }
    }

    /// Runs the pipeline and serializes the result as RSS
    pub async fn run_to_rss(&self) -> Result<String, HarvestError> {
        let report = self.run().await;
        let xml = write_rss(&self.channel(), &report.items)?;
        Ok(xml)
    }
}

/// Runs a complete harvest and returns the RSS document
///
/// # Example
///
/// ```no_run
/// use page_harvest::config::Config;
/// use page_harvest::harvester::harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let rss = harvest(Config::default()).await?;
/// println!("{}", rss);
/// # Ok(())
/// # }
/// ```
pub async fn harvest(config: Config) -> Result<String, HarvestError> {
    let harvester = Harvester::new(config)?;
    harvester.run_to_rss().await
}
