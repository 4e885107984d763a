//! Page retrieval module
//!
//! This module turns the raw URL a reader typed into a normalized target and
//! retrieves the page bytes over HTTP.

pub mod fetcher;
pub mod navigation;

pub use fetcher::{FetchConfig, FetchConfigBuilder, PageFetcher};
pub use navigation::{UrlNormalizer, DEFAULT_MAX_URL_LEN};
