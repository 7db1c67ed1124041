//! HTTP response types for the Up API client.
//!
//! This module provides the [`HttpResponse`] type, which holds the raw
//! outcome of one exchange and gives typed access to the headers the client
//! cares about: request ids and rate-limit hints.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

/// Header carrying the number of requests left in the current window.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Header carrying the time the current window resets.
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// An HTTP response from the Up API.
///
/// Header names are stored lowercased; a header may carry multiple values.
/// The body is kept as received so failure bodies that are not JSON (for
/// example a proxy's HTML error page) survive intact.
///
/// # Example
///
/// ```rust
/// use up_api::HttpResponse;
/// use std::collections::HashMap;
///
/// let mut headers = HashMap::new();
/// headers.insert("x-ratelimit-remaining".to_string(), vec!["42".to_string()]);
///
/// let response = HttpResponse::new(200, headers, "{}");
/// assert!(response.is_ok());
/// assert_eq!(response.rate_limit_remaining(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    ///
    /// Header names are lowercased so lookups are case-insensitive.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let headers = headers
            .into_iter()
            .fold(HashMap::new(), |mut acc: HashMap<String, Vec<String>>, (k, v)| {
                acc.entry(k.to_lowercase()).or_default().extend(v);
                acc
            });

        Self {
            code,
            headers,
            body: body.into(),
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(|value| value.trim())
    }

    /// Returns the `X-Request-Id` header value, if present.
    ///
    /// This ID is useful for debugging and should be included in error reports.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the number of requests left in the current rate-limit window.
    #[must_use]
    pub fn rate_limit_remaining(&self) -> Option<u32> {
        self.header(RATE_LIMIT_REMAINING_HEADER)
            .and_then(|value| value.parse().ok())
    }

    /// Returns the rate-limit reset time from `X-RateLimit-Reset`.
    ///
    /// Accepts Unix epoch seconds or an RFC 3339 timestamp.
    #[must_use]
    pub fn rate_limit_reset(&self) -> Option<DateTime<Utc>> {
        let value = self.header(RATE_LIMIT_RESET_HEADER)?;
        value
            .parse::<i64>()
            .ok()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .or_else(|| {
                DateTime::parse_from_rfc3339(value)
                    .ok()
                    .map(|at| at.with_timezone(&Utc))
            })
    }

    /// Returns the wait requested by a `Retry-After` header, measured from now.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_after_at(Utc::now())
    }

    /// Returns the wait requested by a `Retry-After` header, measured from
    /// `now`.
    ///
    /// Accepts delta-seconds or an HTTP date. A date in the past yields a
    /// zero wait. Values that do not fit a [`Duration`] are ignored.
    #[must_use]
    pub fn retry_after_at(&self, now: DateTime<Utc>) -> Option<Duration> {
        let value = self.header("retry-after")?;
        if let Ok(secs) = value.parse::<u64>() {
            return Some(Duration::from_secs(secs));
        }
        if let Ok(secs) = value.parse::<f64>() {
            return Duration::try_from_secs_f64(secs).ok();
        }
        DateTime::parse_from_rfc2822(value).ok().map(|at| {
            (at.with_timezone(&Utc) - now)
                .to_std()
                .unwrap_or(Duration::ZERO)
        })
    }

    /// Returns when the rate-limit window resets, measured from `now`.
    ///
    /// Prefers `X-RateLimit-Reset`, falling back to `now + Retry-After`. A
    /// deadline past the representable range is ignored.
    #[must_use]
    pub fn reset_deadline(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.rate_limit_reset().or_else(|| {
            self.retry_after_at(now)
                .and_then(|wait| chrono::Duration::from_std(wait).ok())
                .and_then(|wait| now.checked_add_signed(wait))
        })
    }
}
