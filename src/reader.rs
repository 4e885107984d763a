//! Reader pipeline
//!
//! ```text
//! raw URL ──▶ UrlNormalizer ──▶ PageFetcher ──▶ parse ──▶ locate body ──▶ ContentExtractor
//!                                                                              │
//!                                                           Vec<ContentElement> ◀┘
//! ```
//!
//! Every call is independent: the normalized URL travels with the request
//! into the extraction run and nothing is kept between calls.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, Span};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::extraction::{ContentElement, ContentExtractor, ExtractorConfig};
use crate::fetch::{FetchConfig, PageFetcher, UrlNormalizer, DEFAULT_MAX_URL_LEN};

/// A page reduced to reader-view elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadPage {
    /// Normalized URL the page was fetched from
    pub url: String,
    /// Paragraphs and images in document order
    pub elements: Vec<ContentElement>,
}

impl ReadPage {
    /// Render all elements as one HTML fragment
    pub fn render(&self) -> String {
        self.elements.iter().map(ContentElement::render).collect()
    }

    /// Whether nothing readable was found
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Runs the full fetch-and-extract pipeline.
///
/// Cheap to clone; clones share the HTTP connection pool.
#[derive(Debug, Clone)]
pub struct Reader {
    fetcher: PageFetcher,
    extractor: ContentExtractor,
    max_url_len: usize,
}

impl Reader {
    /// Create a reader from fetcher and extractor settings
    pub fn new(fetch: FetchConfig, extract: ExtractorConfig) -> Result<Self> {
        Ok(Self {
            fetcher: PageFetcher::new(fetch)?,
            extractor: ContentExtractor::new(extract),
            max_url_len: DEFAULT_MAX_URL_LEN,
        })
    }

    /// Create a reader from server configuration
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let reader = Self::new(config.fetch_config(), config.extractor_config())?;
        Ok(reader.with_max_url_len(config.max_url_len))
    }

    /// Override the longest accepted input URL
    pub fn with_max_url_len(mut self, max_url_len: usize) -> Self {
        self.max_url_len = max_url_len;
        self
    }

    /// Fetch `raw_url` and return its readable elements
    pub async fn get_content(&self, raw_url: &str) -> Result<Vec<ContentElement>> {
        self.read(raw_url).await.map(|page| page.elements)
    }

    /// Fetch `raw_url` and return the normalized URL with its elements.
    ///
    /// A page with nothing readable is returned with an empty element list.
    #[instrument(skip(self), fields(request_id = %Uuid::new_v4(), url = tracing::field::Empty))]
    pub async fn read(&self, raw_url: &str) -> Result<ReadPage> {
        let url = UrlNormalizer::normalize_with_limit(raw_url, self.max_url_len)?;
        Span::current().record("url", url.as_str());

        let bytes = self.fetcher.fetch(&url).await?;

        let extractor = self.extractor.clone();
        let page_url = url.clone();
        let elements = tokio::task::spawn_blocking(move || {
            extractor.extract_document(&bytes, &page_url)
        })
        .await
        .map_err(|e| Error::generic(format!("extraction task failed: {}", e)))??;

        info!("Read {} elements", elements.len());
        Ok(ReadPage { url, elements })
    }
}

/// Fetch `raw_url` with default settings and return its readable elements.
///
/// Builds a fresh [`Reader`] per call; servers should hold one `Reader` and
/// reuse it.
pub async fn get_content(raw_url: &str) -> Result<Vec<ContentElement>> {
    Reader::new(FetchConfig::default(), ExtractorConfig::default())?
        .get_content(raw_url)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::extraction::{Image, Paragraph};

    #[test]
    fn test_read_page_render() {
        let page = ReadPage {
            url: "https://a.com".to_string(),
            elements: vec![
                ContentElement::Paragraph(Paragraph::new("One. Two").unwrap()),
                ContentElement::Image(Image::new("https://a.com/x.png", "x")),
            ],
        };
        assert_eq!(
            page.render(),
            "<p>One.</p><p>Two.</p><img src=\"https://a.com/x.png\" alt=\"x\">"
        );
        assert!(!page.is_empty());
    }

    #[tokio::test]
    async fn test_empty_url_fails_before_fetch() {
        let err = get_content("   ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyUrl);
    }

    #[tokio::test]
    async fn test_long_url_rejected() {
        let reader = Reader::new(FetchConfig::default(), ExtractorConfig::default())
            .unwrap()
            .with_max_url_len(16);
        let err = reader.read("example.com/a/very/long/path").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUrl);
    }
}
