//! Article extraction
//!
//! Turns a fetched article page into a [`FeedItem`]. Every optional field is
//! extracted independently: an empty selector, a selector that matches
//! nothing, blank text, or an unparseable date just leaves that field unset.
//!
//! Extraction runs in two steps. [`extract_fields`] reads everything it needs
//! from the parsed document synchronously; [`build_item`] then resolves the
//! enclosure over the network. The parsed document is never held across an
//! await.

use crate::config::SelectorSet;
use crate::feed::FeedItem;
use crate::harvester::enclosure::resolve_enclosure;
use crate::harvester::fetcher::Document;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use reqwest::Client;
use scraper::{ElementRef, Selector};

/// Field values read from one article page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFields {
    /// The article's own URL
    pub url: String,
    pub author: Option<String>,
    pub title: Option<String>,

    /// Absolute image URL, before its type is resolved
    pub image: Option<String>,
    pub created: Option<DateTime<Utc>>,

    /// Raw inner HTML of the body element
    pub content: Option<String>,
}

/// Reads every configured field from an article document
pub fn extract_fields(doc: &Document, selectors: &SelectorSet) -> ArticleFields {
    let date_text = first_text(doc, selectors.date.as_ref());

    ArticleFields {
        url: doc.url().to_string(),
        author: first_text(doc, selectors.author.as_ref()),
        title: first_text(doc, selectors.title.as_ref()),
        image: image_source(doc, selectors.image.as_ref()),
        created: date_text.and_then(|text| parse_date(&text, &selectors.date_format)),
        content: inner_html(doc, selectors.description.as_ref()),
    }
}

/// Builds the feed item, resolving the enclosure type if there is an image
pub async fn build_item(client: &Client, fields: ArticleFields) -> FeedItem {
    let enclosure = match &fields.image {
        Some(image) => Some(resolve_enclosure(client, image).await),
        None => None,
    };

    FeedItem {
        author: fields.author,
        title: fields.title,
        enclosure,
        created: fields.created,
        content: fields.content,
        ..FeedItem::new(fields.url)
    }
}

/// Extracts a complete feed item from an article document
pub async fn extract_item(client: &Client, doc: Document, selectors: &SelectorSet) -> FeedItem {
    let fields = extract_fields(&doc, selectors);
    drop(doc);
    build_item(client, fields).await
}

/// Parses a date with a strftime layout, interpreting it as UTC
///
/// Layouts carrying an offset (`%z`) are honored and converted to UTC;
/// date-only layouts resolve to midnight. The text must match the layout
/// exactly, including zero padding and year width.
///
/// # Examples
///
/// ```
/// use page_harvest::harvester::parse_date;
///
/// let created = parse_date("05-Jan-2024", "%d-%b-%Y").unwrap();
/// assert_eq!(created.to_rfc3339(), "2024-01-05T00:00:00+00:00");
/// assert!(parse_date("2024/01/05", "%d-%b-%Y").is_none());
/// assert!(parse_date("5-Jan-2024", "%d-%b-%Y").is_none());
/// ```
pub fn parse_date(text: &str, format: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() || format.is_empty() {
        return None;
    }

    // chrono tolerates unpadded fields and short years; the text must
    // reproduce exactly when formatted back with the same layout
    if let Ok(dt) = DateTime::parse_from_str(text, format) {
        if dt.format(format).to_string() == text {
            return Some(dt.with_timezone(&Utc));
        }
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
        if naive.format(format).to_string() == text {
            return Some(Utc.from_utc_datetime(&naive));
        }
    } else if let Ok(date) = NaiveDate::parse_from_str(text, format) {
        if date.format(format).to_string() == text {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|naive| Utc.from_utc_datetime(&naive));
        }
    }

    tracing::debug!("Date {:?} does not match layout {:?}", text, format);
    None
}

fn first_match<'a>(doc: &'a Document, selector: Option<&Selector>) -> Option<ElementRef<'a>> {
    selector.and_then(|selector| doc.select_first(selector))
}

/// Trimmed text of the first match, if non-empty
fn first_text(doc: &Document, selector: Option<&Selector>) -> Option<String> {
    first_match(doc, selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// `src` of the first match, resolved against the document URL
fn image_source(doc: &Document, selector: Option<&Selector>) -> Option<String> {
    let src = first_match(doc, selector)?.value().attr("src")?.trim();
    if src.is_empty() {
        return None;
    }

    match doc.resolve(src) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            tracing::debug!("Dropping image {:?} on {}: {}", src, doc.url(), e);
            None
        }
    }
}

/// Inner HTML of the first match, verbatim, unless it is blank
fn inner_html(doc: &Document, selector: Option<&Selector>) -> Option<String> {
    first_match(doc, selector)
        .map(|element| element.inner_html())
        .filter(|html| !html.trim().is_empty())
}
