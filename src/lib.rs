//! Page-Harvest: a paginated article harvester
//!
//! This crate walks a paginated listing site, collects every article link it
//! can reach by following the "next page" control, and turns each article
//! page into a feed item that can be serialized as RSS.

pub mod config;
pub mod feed;
pub mod harvester;
pub mod url;

use thiserror::Error;

/// Main error type for Page-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("Feed assembly error: {0}")]
    Feed(#[from] FeedError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}' for {field}: {message}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        message: String,
    },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Unresolvable reference: {0}")]
    Unresolvable(String),
}

/// Feed serialization errors
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to write XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Generated feed is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Result type alias for Page-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

/// Result type alias for feed serialization
pub type FeedResult<T> = std::result::Result<T, FeedError>;

// Re-export commonly used types
pub use config::Config;
pub use feed::{Channel, EnclosureInfo, FeedItem};
pub use harvester::{harvest, HarvestReport, Harvester};
