//! Content extraction module
//!
//! This module reduces a parsed page to reader-view elements: it locates the
//! body, walks it, segments text into sentences and resolves image sources.

pub mod content;
pub mod document;
pub mod elements;
pub mod resolve;

pub use content::{
    extract_from_html, ContentExtractor, ExtractionContext, ExtractorConfig, DEFAULT_MAX_DEPTH,
};
pub use document::{locate_body, parse_document};
pub use elements::{segment_sentences, ContentElement, Image, Paragraph};
pub use resolve::{page_origin, resolve, FALLBACK_IMAGE_SOURCE};
