use crate::config::types::SelectorConfig;
use crate::ConfigError;
use scraper::Selector;

/// Selectors compiled once from a [`SelectorConfig`]
///
/// Optional fields hold `None` when the configured pattern is empty, which
/// tells the extractor to skip that field entirely.
#[derive(Debug, Clone)]
pub struct SelectorSet {
    pub links: Selector,
    pub next_page: Option<Selector>,
    pub title: Option<Selector>,
    pub author: Option<Selector>,
    pub date: Option<Selector>,
    pub date_format: String,
    pub description: Option<Selector>,
    pub image: Option<Selector>,
}

impl SelectorSet {
    /// Compiles every configured pattern
    ///
    /// # Returns
    ///
    /// * `Ok(SelectorSet)` - All patterns parsed
    /// * `Err(ConfigError)` - A pattern is not a valid CSS selector, the link
    ///   pattern is empty, or the date layout is empty
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        let links = compile_optional("links", &config.links)?.ok_or_else(|| {
            ConfigError::Validation("links selector cannot be empty".to_string())
        })?;

        let date = compile_optional("date", &config.date)?;
        if date.is_some() && config.date_format.trim().is_empty() {
            return Err(ConfigError::Validation(
                "date-format cannot be empty when a date selector is set".to_string(),
            ));
        }

        Ok(Self {
            links,
            next_page: compile_optional("next-page", &config.next_page)?,
            title: compile_optional("title", &config.title)?,
            author: compile_optional("author", &config.author)?,
            date,
            date_format: config.date_format.trim().to_string(),
            description: compile_optional("description", &config.description)?,
            image: compile_optional("image", &config.image)?,
        })
    }
}

fn compile_optional(field: &'static str, pattern: &str) -> Result<Option<Selector>, ConfigError> {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return Ok(None);
    }

    Selector::parse(pattern)
        .map(Some)
        .map_err(|e| ConfigError::InvalidSelector {
            field,
            selector: pattern.to_string(),
            message: e.to_string(),
        })
}
