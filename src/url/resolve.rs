use crate::UrlError;
use url::Url;

/// Parses an absolute http(s) URL
///
/// # Examples
///
/// ```
/// use page_harvest::url::parse_absolute;
///
/// assert!(parse_absolute("https://example.com/list").is_ok());
/// assert!(parse_absolute("/list").is_err());
/// ```
pub fn parse_absolute(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    Ok(url)
}

/// Resolves an `href`/`src` value against the URL of the page it came from
///
/// Returns an error for references that do not lead to another http(s)
/// resource:
/// - empty values and fragment-only anchors
/// - `javascript:`, `mailto:`, `tel:` and `data:` schemes
/// - values that fail to join with the base
///
/// # Examples
///
/// ```
/// use page_harvest::url::resolve_href;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/news/list?page=1").unwrap();
/// let next = resolve_href("?page=2", &base).unwrap();
/// assert_eq!(next.as_str(), "https://example.com/news/list?page=2");
/// ```
pub fn resolve_href(href: &str, base_url: &Url) -> Result<Url, UrlError> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return Err(UrlError::Unresolvable(href.to_string()));
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return Err(UrlError::Unresolvable(href.to_string()));
    }

    let absolute = base_url
        .join(href)
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;

    if absolute.scheme() == "http" || absolute.scheme() == "https" {
        Ok(absolute)
    } else {
        Err(UrlError::InvalidScheme(absolute.scheme().to_string()))
    }
}

/// Returns the extension of the last path segment, including the leading dot
///
/// Query string and fragment are ignored. A segment with no dot, or a dot
/// only in leading position (`.hidden`), has no extension.
pub fn path_extension(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.next_back()?;
    let dot = segment.rfind('.')?;
    if dot == 0 || dot + 1 == segment.len() {
        return None;
    }
    Some(segment[dot..].to_string())
}
