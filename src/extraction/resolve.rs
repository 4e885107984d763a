//! Image source resolution
//!
//! Relative `src` values are joined onto the page origin by plain
//! concatenation. `..` segments, query-relative and protocol-relative
//! (`//host/path`) sources are not handled.

use crate::fetch::UrlNormalizer;
use url::Url;

/// Source used when the page URL has no usable origin
pub const FALLBACK_IMAGE_SOURCE: &str = "/na";

/// Derive `scheme://host[:port]` from a page URL.
///
/// Returns `None` if the URL cannot be parsed or lacks a scheme or host.
pub fn page_origin(page_url: &str) -> Option<String> {
    let parsed = Url::parse(page_url.trim()).ok()?;
    let host = parsed.host_str().filter(|h| !h.is_empty())?;
    let scheme = parsed.scheme();

    match parsed.port() {
        Some(port) => Some(format!("{}://{}:{}", scheme, host, port)),
        None => Some(format!("{}://{}", scheme, host)),
    }
}

/// Resolve an image source against the page URL.
///
/// Absolute `http(s)` sources are returned unchanged. Everything else is
/// appended to the page origin, or replaced by [`FALLBACK_IMAGE_SOURCE`]
/// when no origin can be derived.
pub fn resolve(source: &str, page_url: &str) -> String {
    if UrlNormalizer::has_protocol(source) {
        return source.to_string();
    }

    match page_origin(page_url) {
        Some(origin) => format!("{}{}", origin, source),
        None => FALLBACK_IMAGE_SOURCE.to_string(),
    }
}
