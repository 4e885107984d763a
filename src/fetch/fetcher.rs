//! HTTP page retrieval
//!
//! One GET per page, no retries. The whole body is buffered before the
//! extractor sees it.

use crate::error::FetchError;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Default cap on a buffered response body (10 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Default User-Agent header
pub const DEFAULT_USER_AGENT: &str = concat!("thumbread/", env!("CARGO_PKG_VERSION"));

/// Configuration for the page fetcher
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string
    pub user_agent: String,
    /// Whole-request timeout (None = HTTP client default, which never times out)
    pub timeout: Option<Duration>,
    /// Connect timeout (None = HTTP client default)
    pub connect_timeout: Option<Duration>,
    /// Largest body accepted before the read is aborted
    pub max_body_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            connect_timeout: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl FetchConfig {
    /// Create a new config builder
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::default()
    }
}

/// Builder for FetchConfig
#[derive(Default)]
pub struct FetchConfigBuilder {
    config: FetchConfig,
}

impl FetchConfigBuilder {
    /// Set the user agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    /// Set the whole-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Set the body size cap
    pub fn max_body_bytes(mut self, max: usize) -> Self {
        self.config.max_body_bytes = max;
        self
    }

    /// Build the config
    pub fn build(self) -> FetchConfig {
        self.config
    }
}

/// Retrieves raw page bytes over HTTP.
///
/// Holds a single `reqwest::Client` so connections are pooled across
/// requests. The fetcher itself keeps no per-request state and can be shared
/// freely between tasks.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl PageFetcher {
    /// Create a fetcher with the given configuration
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the fetcher configuration
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch the page at `url` and return its full body.
    ///
    /// Non-2xx responses are not treated as failures; their bodies are
    /// returned like any other page.
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        info!("Fetching page");

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream returned HTTP {}", status.as_u16());
        }

        let max = self.config.max_body_bytes;
        if let Some(declared) = response.content_length() {
            if declared > max as u64 {
                return Err(FetchError::ReadFailure(format!(
                    "declared body of {} bytes exceeds limit of {} bytes",
                    declared, max
                )));
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchError::ReadFailure(e.to_string()))?
        {
            if body.len() + chunk.len() > max {
                return Err(FetchError::ReadFailure(format!(
                    "body exceeds limit of {} bytes",
                    max
                )));
            }
            body.extend_from_slice(&chunk);
        }

        debug!("Read {} bytes (HTTP {})", body.len(), status.as_u16());
        Ok(body)
    }
}
