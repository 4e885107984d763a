//! Document parsing and body location

use crate::error::ExtractionError;
use scraper::{ElementRef, Html};
use tracing::{debug, instrument};

/// How many leading bytes are inspected for binary content
const BINARY_SNIFF_LEN: usize = 1024;

/// Parse raw page bytes into an HTML tree.
///
/// html5ever recovers from every markup error, so the only rejection here is
/// a payload that is clearly not text (a NUL byte near the start). Invalid
/// UTF-8 sequences are replaced rather than rejected.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn parse_document(bytes: &[u8]) -> Result<Html, ExtractionError> {
    let head = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
    if head.contains(&0) {
        return Err(ExtractionError::ParsingFailed(
            "payload looks binary, not an HTML document".to_string(),
        ));
    }

    let text = String::from_utf8_lossy(bytes);
    let document = Html::parse_document(&text);
    if !document.errors.is_empty() {
        debug!("Parser recovered from {} markup errors", document.errors.len());
    }
    Ok(document)
}

/// Find the first `body` element in document order.
pub fn locate_body(document: &Html) -> Result<ElementRef<'_>, ExtractionError> {
    document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "body")
        .ok_or(ExtractionError::NoBodyFound)
}
