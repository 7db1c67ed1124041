//! Lazy traversal of paginated listings.
//!
//! A [`Paginator`] walks the `links.next` chain of a listing one page at a
//! time. The first request carries the caller's filters; every later request
//! is the server-issued `next` URL, sent verbatim.
//!
//! # States
//!
//! | state | meaning |
//! |---|---|
//! | [`PaginatorState::Start`] | nothing fetched yet |
//! | [`PaginatorState::HasPage`] | a page was returned and a `next` link exists |
//! | [`PaginatorState::Exhausted`] | the last page had no `next` link |
//! | [`PaginatorState::Failed`] | a fetch failed; the error was returned once |
//!
//! `Exhausted` and `Failed` are terminal. A paginator cannot be restarted;
//! build a new one to walk the listing again. Dropping it stops the walk.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut pages = client.list_webhooks(None);
//! while let Some(page) = pages.next_page().await {
//!     for webhook in page?.webhooks() {
//!         println!("{}", webhook.attributes.url);
//!     }
//! }
//! ```

use crate::clients::{ApiError, HttpRequest, UpClient};
use crate::resources::{Page, PageCursor, Resource};

/// Where a [`Paginator`] is in its walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginatorState {
    /// No page has been fetched yet.
    Start,
    /// A page was returned and another one follows.
    HasPage,
    /// The last page has been returned.
    Exhausted,
    /// A fetch failed.
    Failed,
}

impl PaginatorState {
    /// Returns `true` for states that yield no further pages.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Exhausted | Self::Failed)
    }
}

#[derive(Debug)]
enum Next {
    Initial(HttpRequest),
    Cursor(PageCursor),
    Error(ApiError),
}

/// Forward-only sequence of listing pages.
///
/// Page *n + 1* is never requested before page *n* has been returned.
#[derive(Debug)]
#[must_use = "a paginator does nothing until `next_page` is awaited"]
pub struct Paginator<'a> {
    client: &'a UpClient,
    next: Option<Next>,
    state: PaginatorState,
}

impl<'a> Paginator<'a> {
    pub(crate) const fn new(client: &'a UpClient, request: HttpRequest) -> Self {
        Self {
            client,
            next: Some(Next::Initial(request)),
            state: PaginatorState::Start,
        }
    }

    /// A paginator whose first `next_page` call returns `error`.
    pub(crate) const fn failed(client: &'a UpClient, error: ApiError) -> Self {
        Self {
            client,
            next: Some(Next::Error(error)),
            state: PaginatorState::Start,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> PaginatorState {
        self.state
    }

    /// Returns the cursor the next call will follow, if one is stored.
    #[must_use]
    pub const fn next_cursor(&self) -> Option<&PageCursor> {
        match &self.next {
            Some(Next::Cursor(cursor)) => Some(cursor),
            _ => None,
        }
    }

    /// Fetches the next page.
    ///
    /// Returns `None` once the listing is exhausted or after an error has
    /// been returned.
    pub async fn next_page(&mut self) -> Option<Result<Page, ApiError>> {
        let result = match self.next.take()? {
            Next::Initial(request) => self.client.fetch_page(request).await,
            Next::Cursor(cursor) => self.client.follow_page(&cursor).await,
            Next::Error(error) => Err(error),
        };

        match result {
            Ok(page) => {
                if let Some(cursor) = page.next_cursor() {
                    self.next = Some(Next::Cursor(cursor.clone()));
                    self.state = PaginatorState::HasPage;
                } else {
                    self.state = PaginatorState::Exhausted;
                }
                Some(Ok(page))
            }
            Err(error) => {
                tracing::debug!(error = %error, "Pagination stopped on error");
                self.state = PaginatorState::Failed;
                Some(Err(error))
            }
        }
    }

    /// Drains every remaining page and returns their resources in order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; resources from earlier pages are
    /// discarded.
    pub async fn collect_all(mut self) -> Result<Vec<Resource>, ApiError> {
        let mut resources = Vec::new();
        while let Some(page) = self.next_page().await {
            resources.extend(page?);
        }
        Ok(resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, UpConfig};

    fn client() -> UpClient {
        UpClient::new(&UpConfig::with_token(AccessToken::new("token").unwrap())).unwrap()
    }

    #[test]
    fn test_terminal_states() {
        assert!(!PaginatorState::Start.is_terminal());
        assert!(!PaginatorState::HasPage.is_terminal());
        assert!(PaginatorState::Exhausted.is_terminal());
        assert!(PaginatorState::Failed.is_terminal());
    }

    #[test]
    fn test_failed_paginator_yields_error_once() {
        let client = client();
        let mut paginator = Paginator::failed(&client, ApiError::parse("broken"));

        let first = tokio_test::block_on(paginator.next_page());
        assert!(matches!(first, Some(Err(ApiError::Parse { .. }))));
        assert_eq!(paginator.state(), PaginatorState::Failed);

        assert!(tokio_test::block_on(paginator.next_page()).is_none());
    }

    #[test]
    fn test_new_paginator_starts_without_cursor() {
        let client = client();
        let request = HttpRequest::builder("accounts").build().unwrap();
        let paginator = Paginator::new(&client, request);
        assert_eq!(paginator.state(), PaginatorState::Start);
        assert!(paginator.next_cursor().is_none());
    }
}
