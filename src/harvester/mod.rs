//! Harvester module for listing walks and article extraction
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching into parsed documents
//! - Following pagination to gather article links
//! - Extracting feed items from article pages
//! - Resolving enclosure types
//! - Overall harvest coordination

mod coordinator;
mod enclosure;
mod extractor;
mod fetcher;
mod paginator;

pub use coordinator::{harvest, HarvestReport, Harvester};
pub use enclosure::{mime_type_by_extension, resolve_enclosure};
pub use extractor::{build_item, extract_fields, extract_item, parse_date, ArticleFields};
pub use fetcher::{build_http_client, fetch_document, probe_content_type, Document};
pub use paginator::{collect_links, extract_links, find_next_page, ListingPages, PageWalk};
