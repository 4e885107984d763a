//! Error types for thumbread
//!
//! This module provides the error hierarchy using `thiserror`. Every stage of
//! the reader pipeline has its own error enum; the top-level [`Error`] wraps
//! them so the stages can propagate with `?`.

use thiserror::Error;

/// The main error type for thumbread operations
#[derive(Error, Debug)]
pub enum Error {
    /// URL normalization errors
    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    /// Page retrieval errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Content extraction errors
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// URL normalization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// Input was empty after trimming
    #[error("URL cannot be empty")]
    Empty,

    /// Input exceeded the configured maximum length
    #[error("URL exceeds maximum length of {max} characters (got {actual})")]
    TooLong {
        /// Configured limit
        max: usize,
        /// Length of the rejected input
        actual: usize,
    },
}

/// Page retrieval errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or did not complete
    #[error("Failed to make GET request: {0}")]
    NetworkFailure(String),

    /// The response body could not be read in full
    #[error("Failed to read response body: {0}")]
    ReadFailure(String),

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Content extraction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The payload could not be treated as an HTML document
    #[error("Failed to parse HTML: {0}")]
    ParsingFailed(String),

    /// The parsed document has no body element
    #[error("No body element found")]
    NoBodyFound,
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed
    #[error("Invalid value for {var}: {message}")]
    InvalidValue {
        /// Variable name
        var: String,
        /// What was wrong with it
        message: String,
    },
}

/// Flat classification of pipeline failures.
///
/// The serving layer uses this to pick a response status without matching
/// on the nested enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty input URL
    EmptyUrl,
    /// Input URL rejected for other reasons
    InvalidUrl,
    /// Request could not be made or completed
    NetworkFailure,
    /// Body could not be read
    ReadFailure,
    /// Payload is not an HTML document
    ParseFailure,
    /// Document has no body element
    NoBodyFound,
    /// Anything else (configuration, task failures)
    Internal,
}

/// Result type alias for thumbread operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a generic error from a string
    pub fn generic<S: Into<String>>(msg: S) -> Self {
        Error::Generic(msg.into())
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Url(UrlError::Empty) => ErrorKind::EmptyUrl,
            Error::Url(UrlError::TooLong { .. }) => ErrorKind::InvalidUrl,
            Error::Fetch(FetchError::NetworkFailure(_)) => ErrorKind::NetworkFailure,
            Error::Fetch(FetchError::ReadFailure(_)) => ErrorKind::ReadFailure,
            Error::Fetch(FetchError::ClientBuild(_)) => ErrorKind::Internal,
            Error::Extraction(ExtractionError::ParsingFailed(_)) => ErrorKind::ParseFailure,
            Error::Extraction(ExtractionError::NoBodyFound) => ErrorKind::NoBodyFound,
            Error::Config(_) | Error::Generic(_) => ErrorKind::Internal,
        }
    }

    /// Whether the failure originated from the caller's input rather than upstream
    pub fn is_client_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::EmptyUrl | ErrorKind::InvalidUrl)
    }
}
