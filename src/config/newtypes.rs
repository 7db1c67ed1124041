//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around the values the client is
//! configured with. Invalid values are rejected with clear error messages.

use std::fmt;

use crate::error::ConfigError;

/// The production Up API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.up.com.au/api/v1";

/// Page size used for listings when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// A validated Up personal access token.
///
/// The token is sent as a bearer credential on every request. Its `Debug`
/// implementation masks the value so it never reaches logs.
///
/// # Example
///
/// ```rust
/// use up_api::AccessToken;
///
/// let token = AccessToken::new("up:yeah:abc123").unwrap();
/// assert_eq!(token.as_ref(), "up:yeah:abc123");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty or
    /// only whitespace.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated API base URL.
///
/// The URL must be absolute with an `http` or `https` scheme. Trailing
/// slashes are removed so that paths can be appended uniformly.
///
/// # Example
///
/// ```rust
/// use up_api::BaseUrl;
///
/// let url = BaseUrl::new("https://api.up.com.au/api/v1/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.up.com.au/api/v1");
/// assert_eq!(url.join("accounts"), "https://api.up.com.au/api/v1/accounts");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL does not parse, has
    /// a scheme other than `http`/`https`, or has no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/').to_string();

        let parsed = reqwest::Url::parse(&trimmed)
            .map_err(|_| ConfigError::InvalidBaseUrl { url: url.clone() })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(trimmed))
    }

    /// Appends a relative path to this base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }

    /// Returns `true` if `url` has the same scheme, host and port as this
    /// base URL.
    #[must_use]
    pub fn same_origin(&self, url: &str) -> bool {
        match (reqwest::Url::parse(&self.0), reqwest::Url::parse(url)) {
            (Ok(base), Ok(other)) => base.origin() == other.origin(),
            _ => false,
        }
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(DEFAULT_BASE_URL.to_string())
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated `page[size]` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageSize(u32);

impl PageSize {
    /// Creates a new page size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPageSize`] if `size` is zero.
    pub const fn new(size: u32) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::InvalidPageSize { size });
        }
        Ok(Self(size))
    }

    /// Returns the raw page size.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_rejects_empty_and_blank() {
        assert!(matches!(
            AccessToken::new(""),
            Err(ConfigError::EmptyAccessToken)
        ));
        assert!(matches!(
            AccessToken::new("   "),
            Err(ConfigError::EmptyAccessToken)
        ));
    }

    #[test]
    fn test_access_token_debug_is_masked() {
        let token = AccessToken::new("up:yeah:secret").unwrap();
        let debug = format!("{token:?}");
        assert!(!debug.contains("secret"));
        assert_eq!(debug, "AccessToken(*****)");
    }

    #[test]
    fn test_access_token_bearer_header() {
        let token = AccessToken::new("abc").unwrap();
        assert_eq!(token.bearer_header(), "Bearer abc");
    }

    #[test]
    fn test_base_url_same_origin() {
        let base = BaseUrl::new("https://api.up.com.au/api/v1").unwrap();
        assert!(base.same_origin("https://api.up.com.au/api/v1/transactions?page%5Bafter%5D=y"));
        assert!(base.same_origin("https://api.up.com.au:443/other"));
        assert!(!base.same_origin("https://evil.test/api/v1"));
        assert!(!base.same_origin("not a url"));
    }

    #[test]
    fn test_base_url_trims_trailing_slashes() {
        let url = BaseUrl::new("http://localhost:8080/api/v1//").unwrap();
        assert_eq!(url.as_ref(), "http://localhost:8080/api/v1");
        assert_eq!(url.join("/accounts/1"), "http://localhost:8080/api/v1/accounts/1");
    }

    #[test]
    fn test_base_url_rejects_invalid_values() {
        assert!(BaseUrl::new("api.up.com.au").is_err());
        assert!(BaseUrl::new("ftp://api.up.com.au").is_err());
        assert!(BaseUrl::new("").is_err());
    }

    #[test]
    fn test_base_url_default_is_production() {
        assert_eq!(BaseUrl::default().as_ref(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_page_size_validation() {
        assert!(matches!(
            PageSize::new(0),
            Err(ConfigError::InvalidPageSize { size: 0 })
        ));
        assert_eq!(PageSize::new(100).unwrap().get(), 100);
        assert_eq!(PageSize::default().get(), DEFAULT_PAGE_SIZE);
    }
}
