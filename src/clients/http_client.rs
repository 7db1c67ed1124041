//! HTTP client for Up API communication.
//!
//! This module provides the [`HttpClient`] type, the transport layer that
//! sends authenticated `GET` requests and classifies their outcome.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::clients::errors::ApiError;
use crate::clients::http_request::{HttpRequest, RequestTarget};
use crate::clients::http_response::HttpResponse;
use crate::clients::rate_limit::RateLimiter;
use crate::config::{BaseUrl, RateLimitPolicy, UpConfig};

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Up API.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers: bearer token, `Accept: application/json`, User-Agent
/// - Rate-limit admission and recording via a shared [`RateLimiter`]
/// - Mapping non-2xx responses to [`ApiError`]
///
/// Exactly one network exchange happens per [`request`](Self::request);
/// nothing is retried.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync` and cheap to clone. Clones share the same
/// connection pool and rate-limit state.
///
/// # Example
///
/// ```rust,ignore
/// use up_api::{AccessToken, HttpClient, HttpRequest, UpConfig};
///
/// let config = UpConfig::with_token(AccessToken::new("up:yeah:token")?);
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder("util/ping").build()?;
/// let response = client.request(request).await?;
/// println!("{}", response.body);
/// ```
#[derive(Clone)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL, e.g. `https://api.up.com.au/api/v1`.
    base_url: BaseUrl,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    rate_limiter: Arc<RateLimiter>,
    rate_limit_policy: RateLimitPolicy,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("rate_limiter", &self.rate_limiter)
            .field("rate_limit_policy", &self.rate_limit_policy)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Creates a new HTTP client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the underlying reqwest client
    /// cannot be created (for example, TLS initialisation failure).
    pub fn new(config: &UpConfig) -> Result<Self, ApiError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Up API Rust Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Authorization".to_string(),
            config.token().bearer_header(),
        );

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            default_headers,
            rate_limiter: Arc::new(RateLimiter::new()),
            rate_limit_policy: config.rate_limit_policy(),
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the rate-limit tracker shared by all calls of this client.
    #[must_use]
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Resolves a request target to an absolute URL.
    #[must_use]
    pub fn url_for(&self, target: &RequestTarget) -> String {
        match target {
            RequestTarget::Path(path) => self.base_url.join(path),
            RequestTarget::Url(url) => url.clone(),
        }
    }

    /// Sends a `GET` request to the Up API.
    ///
    /// This method handles:
    /// - Request validation
    /// - Rate-limit admission per the configured [`RateLimitPolicy`]
    /// - URL construction and default headers
    /// - Recording the response's rate-limit headers
    /// - Mapping non-2xx responses to [`ApiError`]
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if:
    /// - Request validation fails, including a server-issued URL on a foreign
    ///   origin (`InvalidRequest`)
    /// - The quota is exhausted under [`RateLimitPolicy::FailFast`] (`RateLimited`)
    /// - No response is received (`Transport`)
    /// - A non-2xx response is received (see [`ApiError::from_response`])
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        request.verify_for(&self.base_url)?;

        self.rate_limiter.acquire(self.rate_limit_policy).await?;

        let url = self.url_for(&request.target);
        tracing::debug!(url = %url, query = ?request.query, "Sending Up API request");

        let mut req_builder = self.client.get(&url);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        let res = req_builder.send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Up API request failed before a response");
            ApiError::Transport(e)
        })?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        let response = HttpResponse::new(code, res_headers, body);
        self.rate_limiter.record(&response);

        if response.is_ok() {
            return Ok(response);
        }

        let error = ApiError::from_response(&response);
        tracing::warn!(
            request = %request.target,
            status = code,
            request_id = response.request_id().unwrap_or("-"),
            "Up API request failed: {error}"
        );
        Err(error)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
