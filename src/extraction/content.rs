//! Body content extraction
//!
//! Walks the body subtree in document order and reduces it to paragraphs and
//! images. Text nodes are concatenated into an accumulator that is flushed as
//! a [`Paragraph`] whenever an image is reached and once more at the end, so
//! every paragraph corresponds to one contiguous run of text.

use crate::error::ExtractionError;
use crate::extraction::document::{locate_body, parse_document};
use crate::extraction::elements::{ContentElement, Image, Paragraph};
use crate::extraction::resolve::resolve;
use scraper::node::Node;
use scraper::{ElementRef, Html};
use tracing::{debug, instrument, warn};

/// Elements whose whole subtree is ignored
const SKIPPED_TAGS: &[&str] = &["style", "script"];

/// Default limit on element nesting below the body
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Configuration for content extraction
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Nodes nested deeper than this below the body are not visited
    pub max_depth: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Per-run extraction state.
///
/// Owns the page URL used to resolve image sources and the text accumulator.
/// A context lives for exactly one walk and is consumed by [`finish`].
///
/// [`finish`]: ExtractionContext::finish
#[derive(Debug)]
pub struct ExtractionContext {
    page_url: String,
    accumulator: String,
    elements: Vec<ContentElement>,
}

impl ExtractionContext {
    /// Start a run for the page at `page_url`
    pub fn new(page_url: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
            accumulator: String::new(),
            elements: Vec::new(),
        }
    }

    /// Page URL image sources are resolved against
    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    /// Text collected since the last flush
    pub fn pending_text(&self) -> &str {
        &self.accumulator
    }

    /// Append a text node. Surrounding whitespace is dropped and no separator
    /// is inserted between runs.
    pub fn push_text(&mut self, text: &str) {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            self.accumulator.push_str(trimmed);
        }
    }

    /// Flush pending text, then append an image with its source resolved.
    pub fn push_image(&mut self, src: &str, alt: &str) {
        self.flush();
        let source = resolve(src, &self.page_url);
        self.elements.push(ContentElement::Image(Image::new(source, alt)));
    }

    /// Emit pending text as a paragraph and reset the accumulator.
    pub fn flush(&mut self) {
        if self.accumulator.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.accumulator);
        if let Some(paragraph) = Paragraph::new(text) {
            self.elements.push(ContentElement::Paragraph(paragraph));
        }
    }

    /// Flush and return the elements in document order
    pub fn finish(mut self) -> Vec<ContentElement> {
        self.flush();
        self.elements
    }
}

/// Content extraction functionality
#[derive(Debug, Clone, Default)]
pub struct ContentExtractor {
    config: ExtractorConfig,
}

impl ContentExtractor {
    /// Create an extractor with the given configuration
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Get the extractor configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract elements from raw page bytes.
    ///
    /// Parses the document, locates the body and walks it. A body with
    /// nothing readable yields an empty list, not an error.
    #[instrument(skip(self, bytes))]
    pub fn extract_document(
        &self,
        bytes: &[u8],
        page_url: &str,
    ) -> Result<Vec<ContentElement>, ExtractionError> {
        let document = parse_document(bytes)?;
        self.extract_parsed(&document, page_url)
    }

    /// Extract elements from an already parsed document
    pub fn extract_parsed(
        &self,
        document: &Html,
        page_url: &str,
    ) -> Result<Vec<ContentElement>, ExtractionError> {
        let body = locate_body(document)?;
        Ok(self.extract(body, page_url))
    }

    /// Walk `body` and return its paragraphs and images in document order.
    ///
    /// Uses an explicit stack so hostile nesting cannot exhaust the call
    /// stack; anything deeper than `max_depth` is left out.
    #[instrument(skip(self, body))]
    pub fn extract(&self, body: ElementRef<'_>, page_url: &str) -> Vec<ContentElement> {
        let mut ctx = ExtractionContext::new(page_url);
        let mut truncated = false;

        // (node, depth below body); children are pushed reversed so they pop in order
        let mut stack = vec![(*body, 0usize)];

        while let Some((node, depth)) = stack.pop() {
            match node.value() {
                Node::Element(el) => {
                    let name = el.name();
                    if SKIPPED_TAGS.contains(&name) {
                        continue;
                    }
                    if name == "img" {
                        ctx.push_image(el.attr("src").unwrap_or(""), el.attr("alt").unwrap_or(""));
                    }
                }
                Node::Text(text) => ctx.push_text(&text.text),
                _ => {}
            }

            if depth >= self.config.max_depth {
                if node.has_children() && !truncated {
                    warn!(
                        "Nesting exceeds {} levels, skipping deeper content",
                        self.config.max_depth
                    );
                    truncated = true;
                }
                continue;
            }

            for child in node.children().rev() {
                stack.push((child, depth + 1));
            }
        }

        let elements = ctx.finish();
        debug!("Extracted {} elements", elements.len());
        elements
    }
}

/// Extract elements from already retrieved markup with default settings
pub fn extract_from_html(
    bytes: &[u8],
    page_url: &str,
) -> Result<Vec<ContentElement>, ExtractionError> {
    ContentExtractor::default().extract_document(bytes, page_url)
}
