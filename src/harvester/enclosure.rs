//! Enclosure type resolution
//!
//! The MIME type of an enclosure comes from its path extension when that is
//! recognized, and from a HEAD probe otherwise. Neither path downloads the
//! resource, so the length is always the unknown placeholder.

use crate::feed::EnclosureInfo;
use crate::harvester::fetcher::probe_content_type;
use crate::url::{parse_absolute, path_extension};
use reqwest::Client;

/// Extension table, lowercase, without the leading dot
const MIME_TYPES: &[(&str, &str)] = &[
    ("avif", "image/avif"),
    ("bmp", "image/bmp"),
    ("gif", "image/gif"),
    ("ico", "image/vnd.microsoft.icon"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("png", "image/png"),
    ("svg", "image/svg+xml"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("webp", "image/webp"),
    ("mp3", "audio/mpeg"),
    ("m4a", "audio/mp4"),
    ("ogg", "audio/ogg"),
    ("wav", "audio/wav"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("css", "text/css; charset=utf-8"),
    ("htm", "text/html; charset=utf-8"),
    ("html", "text/html; charset=utf-8"),
    ("js", "text/javascript; charset=utf-8"),
    ("mjs", "text/javascript; charset=utf-8"),
    ("json", "application/json"),
    ("pdf", "application/pdf"),
    ("wasm", "application/wasm"),
    ("xml", "text/xml; charset=utf-8"),
];

/// Looks up a MIME type by extension (with or without the leading dot)
///
/// # Examples
///
/// ```
/// use page_harvest::harvester::mime_type_by_extension;
///
/// assert_eq!(mime_type_by_extension(".JPG"), Some("image/jpeg"));
/// assert_eq!(mime_type_by_extension("xyz"), None);
/// ```
pub fn mime_type_by_extension(extension: &str) -> Option<&'static str> {
    let extension = extension.trim_start_matches('.').to_ascii_lowercase();
    MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// Resolves the enclosure for a resource URL
///
/// A failed or non-success HEAD probe leaves the MIME type empty; this
/// function never fails.
pub async fn resolve_enclosure(client: &Client, resource: &str) -> EnclosureInfo {
    let url = match parse_absolute(resource) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Enclosure {:?} is not an absolute URL: {}", resource, e);
            return EnclosureInfo::new(resource, "");
        }
    };

    if let Some(mime) = path_extension(&url).and_then(|ext| mime_type_by_extension(&ext)) {
        return EnclosureInfo::new(url.as_str(), mime);
    }

    let mime = match probe_content_type(client, &url).await {
        Ok(Some(mime)) => mime,
        Ok(None) => {
            tracing::debug!("HEAD {} returned no Content-Type", url);
            String::new()
        }
        Err(e) => {
            tracing::warn!("Could not determine enclosure type for {}: {}", url, e);
            String::new()
        }
    };

    EnclosureInfo::new(url.as_str(), mime)
}
