use crate::config::selectors::SelectorSet;
use crate::config::types::{Config, FeedConfig, HttpConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound on simultaneous article fetches
pub const MAX_CONCURRENCY: usize = 32;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_feed_config(&config.feed)?;
    validate_http_config(&config.http)?;
    // Compiling the selectors checks every pattern and the date layout
    SelectorSet::compile(&config.selectors)?;
    Ok(())
}

/// Validates feed configuration
fn validate_feed_config(config: &FeedConfig) -> Result<(), ConfigError> {
    if config.title.trim().is_empty() {
        return Err(ConfigError::Validation(
            "feed title cannot be empty".to_string(),
        ));
    }

    validate_seed_url(&config.seed_url)
}

/// The seed must be an absolute http(s) URL
fn validate_seed_url(seed: &str) -> Result<(), ConfigError> {
    let url = Url::parse(seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' must use http or https",
            seed
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.concurrency < 1 || config.concurrency > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and {}, got {}",
            MAX_CONCURRENCY, config.concurrency
        )));
    }

    if config.timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "timeout-secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}
