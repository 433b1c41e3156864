use serde::Deserialize;

/// Listing page the original harvester was built for
pub const DEFAULT_SEED_URL: &str = "https://www.eurekalert.org/news-releases/browse/all";

/// Icon inside the pagination list whose enclosing anchor points at the next page
pub const DEFAULT_NEXT_PAGE_SELECTOR: &str = "ul.pagination i.fa-angle-right";

/// chrono layout equivalent to `02-Jan-2006`
pub const DEFAULT_DATE_FORMAT: &str = "%d-%b-%Y";

/// Main configuration structure for Page-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub selectors: SelectorConfig,
    pub http: HttpConfig,
}

/// Feed channel metadata and the crawl entry point
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FeedConfig {
    /// Channel title
    pub title: String,

    /// Channel description
    pub description: String,

    /// First listing page of the crawl
    pub seed_url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            title: "EurekAlert RSS generator by cpbotha.net".to_string(),
            description: "EurekAlert RSS generator by cpbotha.net".to_string(),
            seed_url: DEFAULT_SEED_URL.to_string(),
        }
    }
}

/// Per-field selection patterns applied to listing and article pages
///
/// An empty optional selector means "do not extract this field".
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectorConfig {
    /// Article links on a listing page
    pub links: String,

    /// Pagination "next" icon on a listing page
    pub next_page: String,

    pub title: String,
    pub author: String,
    pub date: String,

    /// chrono strftime layout used to parse the date text
    pub date_format: String,

    /// Element whose inner HTML becomes the item content
    pub description: String,

    /// Image element whose `src` becomes the enclosure
    pub image: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            links: "article.post > a".to_string(),
            next_page: DEFAULT_NEXT_PAGE_SELECTOR.to_string(),
            title: "h1.page_title".to_string(),
            author: "p.meta_institute".to_string(),
            date: "div.release_date > time".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            description: "div.entry".to_string(),
            image: "figure.thumbnail img".to_string(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Overall per-request timeout; the transport default applies when unset
    pub timeout_secs: Option<u64>,

    /// Number of article pages fetched at once
    pub concurrency: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("page-harvest/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: None,
            concurrency: 1,
        }
    }
}
