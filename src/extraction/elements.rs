//! Reader-view content elements
//!
//! The output of an extraction run is a flat list of [`ContentElement`]s.
//! The set is closed (paragraphs and images), so rendering is a single
//! exhaustive `match`.

use serde::{Deserialize, Serialize};

/// One unit of simplified page content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentElement {
    /// A contiguous run of text, split into sentences
    Paragraph(Paragraph),
    /// An image with an absolute source
    Image(Image),
}

impl ContentElement {
    /// Render the element as an HTML fragment.
    ///
    /// Text and attribute values are entity-encoded.
    pub fn render(&self) -> String {
        match self {
            ContentElement::Paragraph(p) => p
                .sentences
                .iter()
                .map(|s| format!("<p>{}</p>", htmlescape::encode_minimal(s)))
                .collect(),
            ContentElement::Image(img) => format!(
                "<img src=\"{}\" alt=\"{}\">",
                htmlescape::encode_minimal(&img.source),
                htmlescape::encode_minimal(&img.alt_text)
            ),
        }
    }

    /// Get the paragraph, if this is one
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            ContentElement::Paragraph(p) => Some(p),
            ContentElement::Image(_) => None,
        }
    }

    /// Get the image, if this is one
    pub fn as_image(&self) -> Option<&Image> {
        match self {
            ContentElement::Image(img) => Some(img),
            ContentElement::Paragraph(_) => None,
        }
    }
}

/// A text run from the page, kept both raw and segmented
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Accumulated text as found in the page (trimmed)
    pub text: String,
    /// Period-terminated sentences derived from `text`
    pub sentences: Vec<String>,
}

impl Paragraph {
    /// Build a paragraph from accumulated text.
    ///
    /// Returns `None` when the text yields no sentences (empty, whitespace, or
    /// only periods), so every paragraph renders to at least one `<p>`.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        let sentences = segment_sentences(&text);
        if sentences.is_empty() {
            return None;
        }
        Some(Self {
            text: text.trim().to_string(),
            sentences,
        })
    }
}

/// An image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Absolute URL, or the fallback placeholder when the page origin is unusable
    pub source: String,
    /// Alternative text (may be empty)
    pub alt_text: String,
}

impl Image {
    /// Create a new image element
    pub fn new(source: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            alt_text: alt_text.into(),
        }
    }
}

/// Split text on `.` into trimmed, period-terminated sentences.
///
/// Empty segments are dropped.
///
/// ```
/// use thumbread::extraction::segment_sentences;
///
/// assert_eq!(
///     segment_sentences("Hello world. This is a test. "),
///     vec!["Hello world.", "This is a test."]
/// );
/// ```
pub fn segment_sentences(text: &str) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("{}.", s))
        .collect()
}
