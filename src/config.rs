//! Server configuration
//!
//! Settings are read from `THUMBREAD_*` environment variables; command-line
//! flags in `main` override them.
//!
//! - `THUMBREAD_HOST`: bind address (default: 127.0.0.1)
//! - `THUMBREAD_PORT`: listen port (default: 8080)
//! - `THUMBREAD_USER_AGENT`: User-Agent sent upstream
//! - `THUMBREAD_TIMEOUT_SECS`: whole-request timeout for page fetches (default: none)
//! - `THUMBREAD_MAX_BODY_BYTES`: largest page accepted (default: 10 MiB)
//! - `THUMBREAD_MAX_DEPTH`: nesting limit for the content walk (default: 512)

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

use crate::error::ConfigError;
use crate::extraction::{ExtractorConfig, DEFAULT_MAX_DEPTH};
use crate::fetch::fetcher::{DEFAULT_MAX_BODY_BYTES, DEFAULT_USER_AGENT};
use crate::fetch::{FetchConfig, DEFAULT_MAX_URL_LEN};

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration for the reader server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: IpAddr,
    /// Listen port
    pub port: u16,
    /// User-Agent for upstream requests
    pub user_agent: String,
    /// Whole-request fetch timeout (None = HTTP client default)
    pub timeout: Option<Duration>,
    /// Largest page body accepted
    pub max_body_bytes: usize,
    /// Nesting limit for the content walk
    pub max_depth: usize,
    /// Longest URL accepted from readers
    pub max_url_len: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            max_depth: DEFAULT_MAX_DEPTH,
            max_url_len: DEFAULT_MAX_URL_LEN,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Unset keys fall back to defaults; set but unparseable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = parse_var(&lookup, "THUMBREAD_HOST")?.unwrap_or(defaults.host);
        let port = parse_var(&lookup, "THUMBREAD_PORT")?.unwrap_or(defaults.port);
        let user_agent = lookup("THUMBREAD_USER_AGENT")
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or(defaults.user_agent);
        let timeout = parse_var::<u64, _>(&lookup, "THUMBREAD_TIMEOUT_SECS")?
            .map(Duration::from_secs);
        let max_body_bytes =
            parse_var(&lookup, "THUMBREAD_MAX_BODY_BYTES")?.unwrap_or(defaults.max_body_bytes);
        let max_depth = parse_var(&lookup, "THUMBREAD_MAX_DEPTH")?.unwrap_or(defaults.max_depth);

        if max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                var: "THUMBREAD_MAX_BODY_BYTES".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        if timeout == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidValue {
                var: "THUMBREAD_TIMEOUT_SECS".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(Self {
            host,
            port,
            user_agent,
            timeout,
            max_body_bytes,
            max_depth,
            max_url_len: defaults.max_url_len,
        })
    }

    /// Socket address to bind
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Fetcher settings derived from this config
    pub fn fetch_config(&self) -> FetchConfig {
        let mut builder = FetchConfig::builder()
            .user_agent(self.user_agent.clone())
            .max_body_bytes(self.max_body_bytes);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Extractor settings derived from this config
    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            max_depth: self.max_depth,
        }
    }

    /// Log the effective settings
    pub fn log_summary(&self) {
        info!(
            "Config: bind={} timeout={:?} max_body_bytes={} max_depth={}",
            self.socket_addr(),
            self.timeout,
            self.max_body_bytes,
            self.max_depth
        );
    }
}

fn parse_var<T, F>(lookup: &F, var: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                var: var.to_string(),
                message: e.to_string(),
            }),
    }
}
