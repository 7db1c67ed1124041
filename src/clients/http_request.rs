//! HTTP request types for the Up API client.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the Up API. Every request is a `GET`; a request
//! either names a path relative to the configured base URL or carries an
//! absolute URL handed out by the server (a pagination `next` link or a
//! relationship `related` link).

use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;
use crate::config::BaseUrl;

/// Where a request is sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestTarget {
    /// A path relative to the configured base URL, e.g. `accounts/abc`.
    Path(String),
    /// An absolute URL returned by the server, sent verbatim.
    Url(String),
}

impl fmt::Display for RequestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "/{}", path.trim_start_matches('/')),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// A request to be sent to the Up API.
///
/// Use [`HttpRequest::builder`] to construct path requests with query
/// parameters, and [`HttpRequest::follow`] for server-issued URLs.
///
/// # Example
///
/// ```rust
/// use up_api::HttpRequest;
///
/// let request = HttpRequest::builder("accounts")
///     .query_param("page[size]", "20")
///     .query_param("filter[accountType]", "SAVER")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.query.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// The request target.
    pub target: RequestTarget,
    /// Query parameters, in the order they are sent.
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    /// Creates a new builder for a request relative to the base URL.
    #[must_use]
    pub fn builder(path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(path)
    }

    /// Creates a request for an absolute URL returned by the server.
    ///
    /// The URL already carries every query parameter it needs, so none are
    /// added.
    #[must_use]
    pub fn follow(url: impl Into<String>) -> Self {
        Self {
            target: RequestTarget::Url(url.into()),
            query: Vec::new(),
        }
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - a path target is empty
    /// - a URL target does not parse as an `http`/`https` URL
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        match &self.target {
            RequestTarget::Path(path) => {
                if path.trim_matches('/').is_empty() {
                    return Err(InvalidHttpRequestError::EmptyPath);
                }
            }
            RequestTarget::Url(url) => {
                let valid = reqwest::Url::parse(url)
                    .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
                    .unwrap_or(false);
                if !valid {
                    return Err(InvalidHttpRequestError::InvalidUrl { url: url.clone() });
                }
            }
        }

        Ok(())
    }

    /// Validates the request for sending against `base_url`.
    ///
    /// In addition to [`verify`](Self::verify), an absolute URL must share
    /// the scheme, host and port of `base_url`, so the bearer token never
    /// leaves the configured API.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::ForeignOrigin`] for a URL on
    /// another origin, or any error [`verify`](Self::verify) returns.
    pub fn verify_for(&self, base_url: &BaseUrl) -> Result<(), InvalidHttpRequestError> {
        self.verify()?;
        if let RequestTarget::Url(url) = &self.target {
            if !base_url.same_origin(url) {
                return Err(InvalidHttpRequestError::ForeignOrigin { url: url.clone() });
            }
        }
        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    path: String,
    query: Vec<(String, String)>,
}

impl HttpRequestBuilder {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds several query parameters, preserving their order.
    #[must_use]
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            target: RequestTarget::Path(self.path),
            query: self.query,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_query_order() {
        let request = HttpRequest::builder("accounts")
            .query_param("page[size]", "10")
            .query_param("filter[accountType]", "SAVER")
            .query_param("filter[ownershipType]", "JOINT")
            .build()
            .unwrap();

        let keys: Vec<&str> = request.query.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            ["page[size]", "filter[accountType]", "filter[ownershipType]"]
        );
        assert_eq!(request.target, RequestTarget::Path("accounts".to_string()));
    }

    #[test]
    fn test_empty_path_is_rejected() {
        assert_eq!(
            HttpRequest::builder("").build().unwrap_err(),
            InvalidHttpRequestError::EmptyPath
        );
        assert_eq!(
            HttpRequest::builder("/").build().unwrap_err(),
            InvalidHttpRequestError::EmptyPath
        );
    }

    #[test]
    fn test_follow_validates_url() {
        let next = HttpRequest::follow("https://api.up.com.au/api/v1/accounts?page%5Bafter%5D=x");
        assert!(next.verify().is_ok());
        assert!(next.query.is_empty());

        assert!(matches!(
            HttpRequest::follow("not a url").verify(),
            Err(InvalidHttpRequestError::InvalidUrl { .. })
        ));
        assert!(matches!(
            HttpRequest::follow("ftp://api.up.com.au/accounts").verify(),
            Err(InvalidHttpRequestError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_follow_requires_configured_origin() {
        let base = BaseUrl::new("https://api.up.com.au/api/v1").unwrap();
        let same = HttpRequest::follow("https://api.up.com.au/api/v1/accounts?page%5Bafter%5D=x");
        assert!(same.verify_for(&base).is_ok());

        for url in [
            "https://attacker.test/api/v1/accounts",
            "http://api.up.com.au/api/v1/accounts",
            "https://api.up.com.au:8443/api/v1/accounts",
        ] {
            assert_eq!(
                HttpRequest::follow(url).verify_for(&base),
                Err(InvalidHttpRequestError::ForeignOrigin {
                    url: url.to_string()
                }),
                "{url}"
            );
        }

        let path = HttpRequest::builder("accounts").build().unwrap();
        assert!(path.verify_for(&base).is_ok());
    }

    #[test]
    fn test_target_display() {
        assert_eq!(
            RequestTarget::Path("util/ping".to_string()).to_string(),
            "/util/ping"
        );
        assert_eq!(
            RequestTarget::Url("https://x.test/a".to_string()).to_string(),
            "https://x.test/a"
        );
    }
}
