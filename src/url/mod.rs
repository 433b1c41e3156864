//! URL handling module for Page-Harvest
//!
//! This module resolves references found in fetched documents against the
//! document's own URL and derives file extensions from URL paths.

mod resolve;

pub use resolve::{parse_absolute, path_extension, resolve_href};
