//! HTTP client types for Up API communication.
//!
//! This module provides the transport layer for making authenticated
//! requests to the Up API, classifying failures, and tracking the
//! rate-limit quota, plus the typed [`UpClient`] built on top of it.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`UpClient`]: Typed operations for each Up API endpoint
//! - [`HttpClient`]: The async HTTP client that performs one exchange per call
//! - [`HttpRequest`]: A `GET` request to a path or a server-issued URL
//! - [`HttpResponse`]: A raw response with typed header accessors
//! - [`RateLimiter`]: Quota tracking shared by every call of one client
//! - [`ApiError`]: The error returned by every fallible operation
//!
//! # Example
//!
//! ```rust,ignore
//! use up_api::{AccessToken, UpClient, UpConfig};
//!
//! let config = UpConfig::with_token(AccessToken::new("up:yeah:token")?);
//! let client = UpClient::new(&config)?;
//!
//! let ping = client.ping().await?;
//! println!("{} {}", ping.id, ping.status_emoji);
//! ```
//!
//! # Retry Behavior
//!
//! Nothing is retried. [`ApiError::is_retryable`] reports which failures a
//! caller may retry (transport failures, 5xx, and 429), and
//! [`RateLimiter::reset_at`] tells it how long to hold off.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod rate_limit;
pub mod up;

pub use errors::{ApiError, ErrorDetail, ErrorKind, ErrorSource, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpRequest, HttpRequestBuilder, RequestTarget};
pub use http_response::{HttpResponse, RATE_LIMIT_REMAINING_HEADER, RATE_LIMIT_RESET_HEADER};
pub use rate_limit::{Admission, RateLimitState, RateLimiter};

pub use up::{AccountListParams, TransactionListParams, TransactionStatus, UpClient};
