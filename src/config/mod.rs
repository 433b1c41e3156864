//! Configuration module for Page-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and compiling the configured selectors. Every key has a built-in
//! default, so running without a file harvests the EurekAlert news listing.
//!
//! # Example
//!
//! ```no_run
//! use page_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Links selector: {}", config.selectors.links);
//! ```

mod parser;
mod selectors;
mod types;
mod validation;

pub use parser::{load_config, load_config_or_default, parse_config};
pub use selectors::SelectorSet;
pub use types::{
    Config, FeedConfig, HttpConfig, SelectorConfig, DEFAULT_DATE_FORMAT,
    DEFAULT_NEXT_PAGE_SELECTOR, DEFAULT_SEED_URL,
};
pub use validation::MAX_CONCURRENCY;
