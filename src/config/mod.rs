//! Configuration types for the Up API client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`UpConfig`]: The configuration consumed by [`UpClient`](crate::UpClient)
//! - [`UpConfigBuilder`]: A builder for constructing [`UpConfig`] instances
//! - [`AccessToken`]: A validated personal access token with masked debug output
//! - [`BaseUrl`]: A validated API base URL
//! - [`PageSize`]: A validated default `page[size]`
//! - [`RateLimitPolicy`]: What to do when the rate-limit quota is exhausted
//!
//! The client never reads files or environment variables. Loading a token
//! from disk is the caller's job.
//!
//! # Example
//!
//! ```rust
//! use up_api::{AccessToken, PageSize, RateLimitPolicy, UpConfig};
//!
//! let config = UpConfig::builder()
//!     .token(AccessToken::new("up:yeah:token").unwrap())
//!     .page_size(PageSize::new(50).unwrap())
//!     .rate_limit_policy(RateLimitPolicy::WaitUntilReset)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.page_size().get(), 50);
//! ```

mod newtypes;

pub use newtypes::{AccessToken, BaseUrl, PageSize, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};

use crate::error::ConfigError;

/// Behaviour when a request is attempted while the quota is exhausted.
///
/// The client only ever sleeps when [`RateLimitPolicy::WaitUntilReset`] is
/// configured explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RateLimitPolicy {
    /// Return [`ApiError::RateLimited`](crate::ApiError::RateLimited) without
    /// contacting the server.
    #[default]
    FailFast,
    /// Wait until the advertised reset time, then send the request.
    WaitUntilReset,
}

/// Configuration for the Up API client.
///
/// `UpConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct UpConfig {
    token: AccessToken,
    base_url: BaseUrl,
    page_size: PageSize,
    rate_limit_policy: RateLimitPolicy,
    user_agent_prefix: Option<String>,
}

impl UpConfig {
    /// Creates a new builder for constructing an `UpConfig`.
    #[must_use]
    pub fn builder() -> UpConfigBuilder {
        UpConfigBuilder::new()
    }

    /// Creates a configuration with the given token and all defaults.
    #[must_use]
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            token,
            base_url: BaseUrl::default(),
            page_size: PageSize::default(),
            rate_limit_policy: RateLimitPolicy::default(),
            user_agent_prefix: None,
        }
    }

    /// Returns the access token.
    #[must_use]
    pub const fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default page size for listings.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Returns the rate-limit policy.
    #[must_use]
    pub const fn rate_limit_policy(&self) -> RateLimitPolicy {
        self.rate_limit_policy
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify UpConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<UpConfig>();
};

/// Builder for constructing [`UpConfig`] instances.
///
/// # Defaults
///
/// - `base_url`: [`DEFAULT_BASE_URL`]
/// - `page_size`: [`DEFAULT_PAGE_SIZE`]
/// - `rate_limit_policy`: [`RateLimitPolicy::FailFast`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct UpConfigBuilder {
    token: Option<AccessToken>,
    base_url: Option<BaseUrl>,
    page_size: Option<PageSize>,
    rate_limit_policy: Option<RateLimitPolicy>,
    user_agent_prefix: Option<String>,
}

impl UpConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn token(mut self, token: AccessToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the default page size for listings.
    #[must_use]
    pub const fn page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Sets the rate-limit policy.
    #[must_use]
    pub const fn rate_limit_policy(mut self, policy: RateLimitPolicy) -> Self {
        self.rate_limit_policy = Some(policy);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`UpConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if the token is not set.
    pub fn build(self) -> Result<UpConfig, ConfigError> {
        let token = self
            .token
            .ok_or(ConfigError::MissingRequiredField { field: "token" })?;

        Ok(UpConfig {
            token,
            base_url: self.base_url.unwrap_or_default(),
            page_size: self.page_size.unwrap_or_default(),
            rate_limit_policy: self.rate_limit_policy.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
