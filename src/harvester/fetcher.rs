//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made by the harvester:
//! - Building the shared HTTP client from configuration
//! - GET requests that produce parsed documents
//! - HEAD probes used to learn a resource's Content-Type
//!
//! Every response is consumed or dropped inside the function that sent the
//! request, so no connection outlives a fetch on any path.

use crate::config::HttpConfig;
use crate::{HarvestError, UrlResult};
use reqwest::{header::CONTENT_TYPE, Client, Response, StatusCode};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use url::Url;

/// A parsed HTML document bound to the URL it was fetched from
pub struct Document {
    url: Url,
    html: Html,
}

impl Document {
    /// Parses `body` and binds it to `url`
    pub fn parse(url: Url, body: &str) -> Self {
        Self {
            url,
            html: Html::parse_document(body),
        }
    }

    /// URL the document was requested from; relative references resolve against it
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// All elements matching `selector`, in document order
    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> scraper::html::Select<'a, 'b> {
        self.html.select(selector)
    }

    /// First element matching `selector`
    pub fn select_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    /// Resolves a reference found in this document to an absolute URL
    pub fn resolve(&self, href: &str) -> UrlResult<Url> {
        crate::url::resolve_href(href, &self.url)
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").field("url", &self.url.as_str()).finish()
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP section of the configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use page_harvest::config::HttpConfig;
/// use page_harvest::harvester::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.clone())
        .gzip(true)
        .brotli(true);

    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetches `url` and parses the body into a [`Document`]
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Request could not be sent, timed out, or body read failed | `Transport` |
/// | Status is not 200 OK | `HttpStatus` |
///
/// Any 200 body is parsed, whatever its Content-Type.
pub async fn fetch_document(client: &Client, url: &Url) -> Result<Document, HarvestError> {
    let response = send(client.get(url.clone()), url).await?;

    let body = response.text().await.map_err(|source| HarvestError::Transport {
        url: url.to_string(),
        source,
    })?;

    tracing::debug!("Fetched {} ({} bytes)", url, body.len());

    Ok(Document::parse(url.clone(), &body))
}

/// Sends a HEAD request and returns the Content-Type header, if any
///
/// The response body is never read and is released before returning.
pub async fn probe_content_type(client: &Client, url: &Url) -> Result<Option<String>, HarvestError> {
    let response = send(client.head(url.clone()), url).await?;
    Ok(header_content_type(&response))
}

/// Sends a request and maps transport failures and any status other than 200
async fn send(request: reqwest::RequestBuilder, url: &Url) -> Result<Response, HarvestError> {
    let response = request.send().await.map_err(|source| {
        if source.is_timeout() {
            tracing::debug!("Request timeout for {}", url);
        }
        HarvestError::Transport {
            url: url.to_string(),
            source,
        }
    })?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(HarvestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response)
}

fn header_content_type(response: &Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
