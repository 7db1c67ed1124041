//! Error types for API operations.
//!
//! Every fallible client operation returns [`ApiError`]. Each variant maps to
//! exactly one [`ErrorKind`], and carries enough structured detail (status,
//! API error list, request id, parse context) that callers never need to
//! re-read a raw body.
//!
//! # Status Mapping
//!
//! | condition | variant |
//! |---|---|
//! | no status received (connect/timeout/IO) | [`ApiError::Transport`] |
//! | 401 | [`ApiError::AuthenticationFailed`] |
//! | 403 | [`ApiError::Forbidden`] |
//! | 404 | [`ApiError::NotFound`] |
//! | 422, or any other 4xx with an `errors` array | [`ApiError::ValidationFailed`] |
//! | 429 | [`ApiError::RateLimited`] |
//! | other 4xx | [`ApiError::ClientError`] |
//! | 5xx | [`ApiError::ServerError`] |
//! | 1xx/3xx final status | [`ApiError::UnexpectedStatus`] |
//! | 2xx with a malformed body | [`ApiError::Parse`] |
//!
//! # Example
//!
//! ```rust,ignore
//! use up_api::{ApiError, ErrorKind};
//!
//! match client.retrieve_account("acc-1").await {
//!     Ok(account) => println!("{}", account.attributes.display_name),
//!     Err(e) if e.is_retryable() => println!("try again later: {e}"),
//!     Err(ApiError::NotFound { .. }) => println!("no such account"),
//!     Err(e) => println!("failed ({:?}): {e}", e.kind()),
//! }
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clients::http_response::HttpResponse;
use crate::resources::ResourceType;

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No HTTP status was received.
    TransportError,
    /// The token was rejected (401).
    AuthenticationFailed,
    /// The token lacks access (403).
    Forbidden,
    /// The resource does not exist (404).
    NotFound,
    /// The request was rejected with an error list (422 and similar).
    ValidationFailed,
    /// The rate-limit quota is exhausted (429, or locally before sending).
    RateLimited,
    /// Any other client-side failure.
    ClientError,
    /// The server failed (5xx).
    ServerError,
    /// A successful response could not be decoded.
    ParseError,
    /// A typed resource was requested but an unrecognised type was returned.
    UnrecognizedResourceType,
}

impl ErrorKind {
    /// Returns `true` for kinds a wrapping policy may retry with backoff.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::TransportError | Self::ServerError | Self::RateLimited
        )
    }
}

/// The `source` member of an API error object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSource {
    /// The query parameter that caused the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    /// JSON pointer to the request body member that caused the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
}

/// One entry of an API-reported `errors` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// The HTTP status code, as a string. Numeric codes are accepted.
    #[serde(default, deserialize_with = "status_code")]
    pub status: String,
    /// A short summary of the problem.
    #[serde(default)]
    pub title: String,
    /// A human-readable explanation of this occurrence.
    #[serde(default)]
    pub detail: String,
    /// What part of the request caused the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
}

/// Error returned when an outbound request fails validation before sending.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A relative request path was empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,

    /// An absolute request URL did not parse or used an unsupported scheme.
    #[error("Invalid request URL '{url}'.")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
    },

    /// A server-issued URL points outside the configured API origin.
    #[error("Refusing to send credentials to '{url}': origin differs from the configured base URL.")]
    ForeignOrigin {
        /// The rejected URL.
        url: String,
    },
}

/// Error type of every client operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The exchange failed before an HTTP status was received.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request was rejected before being sent.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The access token was rejected (401).
    #[error("Authentication failed{}", describe(.errors))]
    AuthenticationFailed {
        /// API-reported errors.
        errors: Vec<ErrorDetail>,
        /// The `X-Request-Id` of the response.
        request_id: Option<String>,
    },

    /// The token may not access this resource (403).
    #[error("Forbidden{}", describe(.errors))]
    Forbidden {
        /// API-reported errors.
        errors: Vec<ErrorDetail>,
        /// The `X-Request-Id` of the response.
        request_id: Option<String>,
    },

    /// The resource does not exist (404).
    #[error("Not found{}", describe(.errors))]
    NotFound {
        /// API-reported errors.
        errors: Vec<ErrorDetail>,
        /// The `X-Request-Id` of the response.
        request_id: Option<String>,
    },

    /// The request was rejected with an API error list.
    #[error("Validation failed ({status}){}", describe(.errors))]
    ValidationFailed {
        /// The HTTP status code.
        status: u16,
        /// API-reported errors.
        errors: Vec<ErrorDetail>,
        /// The `X-Request-Id` of the response.
        request_id: Option<String>,
    },

    /// The rate-limit quota is exhausted.
    #[error("Rate limited{}", reset_hint(.reset_at))]
    RateLimited {
        /// How long the server asked the caller to wait.
        retry_after: Option<Duration>,
        /// When the quota is expected to reset.
        reset_at: Option<DateTime<Utc>>,
        /// The `X-Request-Id` of the response, if the server was contacted.
        request_id: Option<String>,
    },

    /// A 4xx response without a more specific mapping.
    #[error("Client error ({status}){}", describe(.errors))]
    ClientError {
        /// The HTTP status code.
        status: u16,
        /// API-reported errors.
        errors: Vec<ErrorDetail>,
        /// The `X-Request-Id` of the response.
        request_id: Option<String>,
    },

    /// The server failed (5xx).
    #[error("Server error ({status}){}", describe(.errors))]
    ServerError {
        /// The HTTP status code.
        status: u16,
        /// API-reported errors.
        errors: Vec<ErrorDetail>,
        /// The `X-Request-Id` of the response.
        request_id: Option<String>,
    },

    /// A final status outside the 2xx/4xx/5xx ranges.
    #[error("Unexpected HTTP status {status}")]
    UnexpectedStatus {
        /// The HTTP status code.
        status: u16,
        /// The `X-Request-Id` of the response.
        request_id: Option<String>,
    },

    /// A successful response did not match the expected document shape.
    #[error("Parse error: {context}")]
    Parse {
        /// What was being decoded and what went wrong.
        context: String,
        /// The underlying JSON error, if any.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A typed resource was requested but the server returned an
    /// unrecognised resource type.
    #[error("Unrecognized resource type '{resource_type}' for resource '{id}'")]
    UnrecognizedResourceType {
        /// The `type` discriminator as sent.
        resource_type: String,
        /// The resource id.
        id: String,
    },

    /// A typed resource was requested but a different known type was returned.
    #[error("Expected a {expected} resource but '{id}' is {found}")]
    UnexpectedResourceType {
        /// The requested type.
        expected: ResourceType,
        /// The returned type.
        found: ResourceType,
        /// The resource id.
        id: String,
    },
}

fn describe(errors: &[ErrorDetail]) -> String {
    errors
        .iter()
        .map(|e| {
            if e.detail.is_empty() {
                e.title.clone()
            } else {
                format!("{}: {}", e.title, e.detail)
            }
        })
        .reduce(|acc, line| format!("{acc}; {line}"))
        .map_or_else(String::new, |joined| format!(": {joined}"))
}

fn reset_hint(reset_at: &Option<DateTime<Utc>>) -> String {
    reset_at.map_or_else(String::new, |at| {
        format!(" until {}", at.to_rfc3339())
    })
}

impl ApiError {
    /// Classifies a failed exchange.
    ///
    /// Should only be called for responses where
    /// [`HttpResponse::is_ok`] is `false`; a 2xx status is reported as
    /// [`ApiError::UnexpectedStatus`] rather than success.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let status = response.code;
        let request_id = response.request_id().map(ToString::to_string);
        let errors = parse_error_details(&response.body);

        match status {
            401 => Self::AuthenticationFailed { errors, request_id },
            403 => Self::Forbidden { errors, request_id },
            404 => Self::NotFound { errors, request_id },
            429 => Self::RateLimited {
                retry_after: response.retry_after(),
                reset_at: response.reset_deadline(Utc::now()),
                request_id,
            },
            422 => Self::ValidationFailed {
                status,
                errors,
                request_id,
            },
            400..=499 if !errors.is_empty() => Self::ValidationFailed {
                status,
                errors,
                request_id,
            },
            400..=499 => Self::ClientError {
                status,
                errors,
                request_id,
            },
            500..=599 => Self::ServerError {
                status,
                errors,
                request_id,
            },
            _ => Self::UnexpectedStatus { status, request_id },
        }
    }

    /// Creates a parse error without an underlying JSON error.
    #[must_use]
    pub fn parse(context: impl Into<String>) -> Self {
        Self::Parse {
            context: context.into(),
            source: None,
        }
    }

    /// Creates a parse error wrapping a JSON error.
    #[must_use]
    pub fn parse_with(context: &str, source: serde_json::Error) -> Self {
        Self::Parse {
            context: format!("{context}: {source}"),
            source: Some(source),
        }
    }

    /// Returns the [`ErrorKind`] of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::TransportError,
            Self::AuthenticationFailed { .. } => ErrorKind::AuthenticationFailed,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::ValidationFailed { .. } => ErrorKind::ValidationFailed,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::InvalidRequest(_) | Self::ClientError { .. } | Self::UnexpectedStatus { .. } => {
                ErrorKind::ClientError
            }
            Self::ServerError { .. } => ErrorKind::ServerError,
            Self::Parse { .. } | Self::UnexpectedResourceType { .. } => ErrorKind::ParseError,
            Self::UnrecognizedResourceType { .. } => ErrorKind::UnrecognizedResourceType,
        }
    }

    /// Returns `true` if a wrapping policy may retry the call.
    ///
    /// Retries of [`ApiError::RateLimited`] must not happen before
    /// `reset_at`.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    /// Returns the HTTP status code, if a response was received.
    ///
    /// [`ApiError::RateLimited`] reports `None` because it may be raised
    /// locally without contacting the server.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailed { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::ValidationFailed { status, .. }
            | Self::ClientError { status, .. }
            | Self::ServerError { status, .. }
            | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the API-reported error list, if any.
    #[must_use]
    pub fn error_details(&self) -> &[ErrorDetail] {
        match self {
            Self::AuthenticationFailed { errors, .. }
            | Self::Forbidden { errors, .. }
            | Self::NotFound { errors, .. }
            | Self::ValidationFailed { errors, .. }
            | Self::ClientError { errors, .. }
            | Self::ServerError { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Returns the `X-Request-Id` of the failed response, if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::AuthenticationFailed { request_id, .. }
            | Self::Forbidden { request_id, .. }
            | Self::NotFound { request_id, .. }
            | Self::ValidationFailed { request_id, .. }
            | Self::RateLimited { request_id, .. }
            | Self::ClientError { request_id, .. }
            | Self::ServerError { request_id, .. }
            | Self::UnexpectedStatus { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }
}

/// Extracts the JSON:API `errors` array from a failure body.
///
/// Bodies that are not JSON, or have no well-formed `errors` array, yield an
/// empty list.
fn parse_error_details(body: &str) -> Vec<ErrorDetail> {
    #[derive(Deserialize)]
    struct ErrorDocument {
        #[serde(default)]
        errors: Vec<serde_json::Value>,
    }

    let Ok(doc) = serde_json::from_str::<ErrorDocument>(body) else {
        return Vec::new();
    };

    // Entries that do not decode are skipped individually.
    doc.errors
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect()
}

fn status_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Status {
        Text(String),
        Code(u64),
    }

    Ok(match Option::<Status>::deserialize(deserializer)? {
        Some(Status::Text(text)) => text,
        Some(Status::Code(code)) => code.to_string(),
        None => String::new(),
    })
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};
