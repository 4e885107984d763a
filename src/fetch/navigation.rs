//! URL normalization
//!
//! Readers type bare hosts like `example.com` into the address bar; this
//! module turns them into something the fetcher can request.

use crate::error::UrlError;
use tracing::debug;

/// Maximum accepted URL length (2048 characters is the common limit)
pub const DEFAULT_MAX_URL_LEN: usize = 2048;

/// Scheme prepended to inputs that carry none
const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// URL normalization utilities
pub struct UrlNormalizer;

impl UrlNormalizer {
    /// Normalize a raw URL using the default length limit.
    ///
    /// Surrounding whitespace is trimmed and `https://` is prepended when the
    /// input has no `http://` or `https://` prefix. The prefix check ignores
    /// case; the casing of the input is kept as-is in the output.
    ///
    /// ```
    /// use thumbread::fetch::UrlNormalizer;
    ///
    /// assert_eq!(UrlNormalizer::normalize("example.com").unwrap(), "https://example.com");
    /// assert_eq!(UrlNormalizer::normalize("HTTP://x.com").unwrap(), "HTTP://x.com");
    /// ```
    pub fn normalize(input: &str) -> std::result::Result<String, UrlError> {
        Self::normalize_with_limit(input, DEFAULT_MAX_URL_LEN)
    }

    /// Normalize a raw URL, rejecting inputs longer than `max_len` characters.
    pub fn normalize_with_limit(
        input: &str,
        max_len: usize,
    ) -> std::result::Result<String, UrlError> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(UrlError::Empty);
        }

        let len = trimmed.chars().count();
        if len > max_len {
            return Err(UrlError::TooLong {
                max: max_len,
                actual: len,
            });
        }

        if Self::has_protocol(trimmed) {
            return Ok(trimmed.to_string());
        }

        debug!("No scheme on {:?}, assuming https", trimmed);
        Ok(format!("{}{}", DEFAULT_SCHEME_PREFIX, trimmed))
    }

    /// Check whether a URL starts with `http://` or `https://`, ignoring case
    /// and surrounding whitespace.
    pub fn has_protocol(url: &str) -> bool {
        let lower = url.trim().to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_https() {
        assert_eq!(
            UrlNormalizer::normalize("example.com").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_normalize_keeps_http() {
        assert_eq!(
            UrlNormalizer::normalize("http://example.com/a").unwrap(),
            "http://example.com/a"
        );
    }

    #[test]
    fn test_normalize_preserves_scheme_casing() {
        assert_eq!(
            UrlNormalizer::normalize("HTTP://x.com").unwrap(),
            "HTTP://x.com"
        );
        assert_eq!(
            UrlNormalizer::normalize("HttpS://X.com/Path").unwrap(),
            "HttpS://X.com/Path"
        );
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(
            UrlNormalizer::normalize("  example.com/page \n").unwrap(),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(UrlNormalizer::normalize(""), Err(UrlError::Empty));
        assert_eq!(UrlNormalizer::normalize("   \t"), Err(UrlError::Empty));
    }

    #[test]
    fn test_normalize_too_long() {
        let long_url = format!("example.com/{}", "a".repeat(3000));
        let result = UrlNormalizer::normalize(&long_url);
        assert!(matches!(result, Err(UrlError::TooLong { max: 2048, .. })));
    }

    #[test]
    fn test_normalize_custom_limit() {
        assert!(UrlNormalizer::normalize_with_limit("a.com", 5).is_ok());
        assert!(UrlNormalizer::normalize_with_limit("ab.com", 5).is_err());
    }

    #[test]
    fn test_other_schemes_get_prefixed() {
        // ftp:// is not recognized, so it is treated as a bare host
        assert_eq!(
            UrlNormalizer::normalize("ftp://example.com").unwrap(),
            "https://ftp://example.com"
        );
    }

    #[test]
    fn test_has_protocol() {
        assert!(UrlNormalizer::has_protocol("http://a.com"));
        assert!(UrlNormalizer::has_protocol("HTTPS://a.com"));
        assert!(UrlNormalizer::has_protocol("  https://a.com"));
        assert!(!UrlNormalizer::has_protocol("/img.png"));
        assert!(!UrlNormalizer::has_protocol("//cdn.a.com/img.png"));
        assert!(!UrlNormalizer::has_protocol("httpx://a.com"));
    }
}
