//! Feed model and serialization
//!
//! This module defines the harvested item model and turns an ordered list
//! of items into an RSS 2.0 document.

mod rss;
mod types;

pub use rss::write_rss;
pub use types::{Channel, EnclosureInfo, FeedItem, UNKNOWN_LENGTH};

use crate::config::FeedConfig;

impl From<&FeedConfig> for Channel {
    fn from(config: &FeedConfig) -> Self {
        Self {
            title: config.title.clone(),
            link: config.seed_url.clone(),
            description: config.description.clone(),
        }
    }
}
