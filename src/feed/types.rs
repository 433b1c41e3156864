use chrono::{DateTime, Utc};

/// Length reported for every enclosure; the resource itself is never downloaded
pub const UNKNOWN_LENGTH: &str = "-1";

/// Feed channel metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub title: String,

    /// Listing page the items were harvested from
    pub link: String,

    pub description: String,
}

/// Attached resource of a feed item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnclosureInfo {
    /// Absolute resource URL
    pub url: String,

    /// MIME type, empty when it could not be determined
    pub mime_type: String,

    /// Always [`UNKNOWN_LENGTH`]
    pub length: String,
}

impl EnclosureInfo {
    /// Creates an enclosure with the unknown-length placeholder
    pub fn new(url: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mime_type: mime_type.into(),
            length: UNKNOWN_LENGTH.to_string(),
        }
    }

    /// Whether the enclosure carries enough to be rendered in a feed
    pub fn is_renderable(&self) -> bool {
        !self.url.is_empty() && !self.mime_type.is_empty()
    }
}

/// One harvested article
///
/// `id` and `link` are both the article URL and are always present; every
/// other field is filled only when its selector matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub id: String,
    pub link: String,
    pub author: Option<String>,
    pub title: Option<String>,
    pub enclosure: Option<EnclosureInfo>,
    pub created: Option<DateTime<Utc>>,

    /// Raw inner HTML of the article body
    pub content: Option<String>,
}

impl FeedItem {
    /// Creates an item with only its identity set
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            id: url.clone(),
            link: url,
            author: None,
            title: None,
            enclosure: None,
            created: None,
            content: None,
        }
    }
}
