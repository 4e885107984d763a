//! thumbread - Minimal Reader View Server
//!
//! This crate fetches a web page and reduces its body to a flat sequence of
//! paragraphs and images, suitable for a distraction-free reader view.
//!
//! # Architecture
//!
//! ```text
//! Reader ──▶ UrlNormalizer ──▶ PageFetcher (reqwest)
//!                                    │
//!                                    ▼
//!                        parse (scraper/html5ever)
//!                                    │
//!                                    ▼
//!                  locate body ──▶ ContentExtractor ──▶ resolve image sources
//!                                    │
//!                                    ▼
//!                        Vec<ContentElement> (Paragraph | Image)
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let elements = thumbread::get_content("example.com").await?;
//!     for element in &elements {
//!         println!("{}", element.render());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Extraction from markup that is already in memory needs no network:
//!
//! ```rust
//! use thumbread::extraction::ContentExtractor;
//!
//! let html = br#"<body><p>A</p><img src="/i.png"><p>B</p></body>"#;
//! let elements = ContentExtractor::default()
//!     .extract_document(html, "https://example.com/post")
//!     .unwrap();
//! assert_eq!(elements.len(), 3);
//! assert_eq!(elements[1].as_image().unwrap().source, "https://example.com/i.png");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extraction;
pub mod fetch;
pub mod handlers;
pub mod reader;

// Re-exports for convenience
pub use config::ServerConfig;
pub use error::{Error, ErrorKind, Result};
pub use extraction::{extract_from_html, ContentElement, ContentExtractor, Image, Paragraph};
pub use fetch::{PageFetcher, UrlNormalizer};
pub use reader::{get_content, ReadPage, Reader};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
