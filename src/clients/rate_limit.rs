//! Rate-limit tracking shared by every call of one client.
//!
//! [`RateLimiter`] records the quota hints of each response (success or
//! failure) and decides, before the next request, whether that request may
//! be sent. The state sits behind a mutex so concurrent listings on one
//! client never observe a torn `remaining`/`reset_at` pair.
//!
//! # Policies
//!
//! When the quota is known to be exhausted and the reset time is in the
//! future, [`RateLimitPolicy::FailFast`] returns [`ApiError::RateLimited`]
//! without contacting the server, while [`RateLimitPolicy::WaitUntilReset`]
//! sleeps until the reset time and then proceeds.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::clients::errors::ApiError;
use crate::clients::http_response::HttpResponse;
use crate::config::RateLimitPolicy;

/// Snapshot of the last known quota.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitState {
    /// Requests left in the current window, if the server reported it.
    pub remaining: Option<u32>,
    /// When the current window resets, if known.
    pub reset_at: Option<DateTime<Utc>>,
}

impl RateLimitState {
    /// Returns `true` if the quota is exhausted until a reset later than `now`.
    #[must_use]
    pub fn is_exhausted_at(&self, now: DateTime<Utc>) -> bool {
        self.remaining == Some(0) && self.reset_at.is_some_and(|at| at > now)
    }
}

/// Outcome of checking the quota before a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The request may be sent now.
    Proceed,
    /// The quota is exhausted until the given time.
    BlockedUntil(DateTime<Utc>),
}

/// Thread-safe rate-limit tracker.
///
/// # Example
///
/// ```rust
/// use up_api::{Admission, HttpResponse, RateLimiter};
/// use chrono::Utc;
/// use std::collections::HashMap;
///
/// let limiter = RateLimiter::new();
/// let mut headers = HashMap::new();
/// headers.insert("x-ratelimit-remaining".to_string(), vec!["5".to_string()]);
/// limiter.record(&HttpResponse::new(200, headers, "{}"));
///
/// assert_eq!(limiter.remaining(), Some(5));
/// assert_eq!(limiter.admit(Utc::now()), Admission::Proceed);
/// ```
#[derive(Debug, Default)]
pub struct RateLimiter {
    state: Mutex<RateLimitState>,
}

// Verify RateLimiter is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RateLimiter>();
};

impl RateLimiter {
    /// Creates a tracker with no known quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut RateLimitState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> RateLimitState {
        self.with_state(|state| *state)
    }

    /// Returns the number of requests left, if known.
    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.snapshot().remaining
    }

    /// Returns when the quota resets, if known.
    #[must_use]
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot().reset_at
    }

    /// Records the quota hints of a response.
    pub fn record(&self, response: &HttpResponse) {
        self.record_at(response, Utc::now());
    }

    /// Records the quota hints of a response received at `now`.
    ///
    /// A 429 without an explicit remaining count is treated as an exhausted
    /// quota. Headers that are absent leave the previous value in place.
    pub fn record_at(&self, response: &HttpResponse, now: DateTime<Utc>) {
        let remaining = response
            .rate_limit_remaining()
            .or_else(|| (response.code == 429).then_some(0));
        let reset_at = response.reset_deadline(now);

        self.with_state(|state| {
            if remaining.is_some() {
                state.remaining = remaining;
            }
            if reset_at.is_some() {
                state.reset_at = reset_at;
            }
        });

        if remaining == Some(0) {
            tracing::debug!(reset_at = ?reset_at, "Rate-limit quota exhausted");
        }
    }

    /// Decides whether a request may be sent at `now`.
    ///
    /// A reset time that has passed clears the exhausted state.
    #[must_use]
    pub fn admit(&self, now: DateTime<Utc>) -> Admission {
        self.with_state(|state| {
            if state.remaining != Some(0) {
                return Admission::Proceed;
            }
            match state.reset_at {
                Some(at) if at > now => Admission::BlockedUntil(at),
                Some(_) => {
                    *state = RateLimitState::default();
                    Admission::Proceed
                }
                None => Admission::Proceed,
            }
        })
    }

    /// Waits for, or refuses, permission to send a request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RateLimited`] under [`RateLimitPolicy::FailFast`]
    /// when the quota is exhausted until a future reset.
    pub async fn acquire(&self, policy: RateLimitPolicy) -> Result<(), ApiError> {
        let now = Utc::now();
        let Admission::BlockedUntil(reset_at) = self.admit(now) else {
            return Ok(());
        };

        let wait = (reset_at - now).to_std().unwrap_or(Duration::ZERO);
        match policy {
            RateLimitPolicy::FailFast => {
                tracing::warn!(%reset_at, "Rate-limit quota exhausted, refusing request");
                Err(ApiError::RateLimited {
                    retry_after: Some(wait),
                    reset_at: Some(reset_at),
                    request_id: None,
                })
            }
            RateLimitPolicy::WaitUntilReset => {
                tracing::warn!(
                    %reset_at,
                    wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                    "Rate-limit quota exhausted, waiting for reset"
                );
                tokio::time::sleep(wait).await;
                Ok(())
            }
        }
    }
}
