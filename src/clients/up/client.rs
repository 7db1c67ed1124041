//! Up API client implementation.
//!
//! This module provides the [`UpClient`] type, which builds requests for each
//! endpoint, sends them through the [`HttpClient`], and decodes the returned
//! documents into typed resources.

use crate::clients::up::params::{page_only, AccountListParams, TransactionListParams};
use crate::clients::{ApiError, HttpClient, HttpRequest, HttpResponse, RateLimiter};
use crate::config::{PageSize, UpConfig};
use crate::pagination::Paginator;
use crate::resources::{
    Account, Category, Document, Page, PageCursor, PingResponse, Resource, Transaction, Webhook,
};

/// Client for the Up Banking API.
///
/// Listing operations return a [`Paginator`] that fetches one page per
/// [`next_page`](Paginator::next_page) call; single-resource operations
/// return the typed resource directly.
///
/// # Thread Safety
///
/// `UpClient` is `Send + Sync` and cheap to clone. Clones share one
/// connection pool and one [`RateLimiter`].
///
/// # Example
///
/// ```rust,ignore
/// use up_api::{AccessToken, AccountListParams, AccountType, UpClient, UpConfig};
///
/// let config = UpConfig::with_token(AccessToken::new("up:yeah:token")?);
/// let client = UpClient::new(&config)?;
///
/// let mut accounts = client.list_accounts(AccountListParams {
///     account_type: Some(AccountType::Saver),
///     ..Default::default()
/// });
///
/// while let Some(page) = accounts.next_page().await {
///     for account in page?.accounts() {
///         println!("{}: {}", account.attributes.display_name, account.attributes.balance);
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct UpClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
    /// Default `page[size]` for listings.
    page_size: PageSize,
}

// Verify UpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<UpClient>();
};

impl UpClient {
    /// Creates a new client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be created.
    pub fn new(config: &UpConfig) -> Result<Self, ApiError> {
        Ok(Self {
            http_client: HttpClient::new(config)?,
            page_size: config.page_size(),
        })
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns the rate-limit tracker shared by all calls of this client.
    #[must_use]
    pub fn rate_limiter(&self) -> &RateLimiter {
        self.http_client.rate_limiter()
    }

    /// Returns the default page size for listings.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Checks that the token is valid (`GET /util/ping`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthenticationFailed`] for a rejected token, or
    /// any other [`ApiError`] the exchange produces.
    pub async fn ping(&self) -> Result<PingResponse, ApiError> {
        let response = self.get(HttpRequest::builder("util/ping").build()?).await?;
        PingResponse::parse(&response.body)
    }

    /// Lists accounts (`GET /accounts`).
    ///
    /// Nothing is sent until the first [`Paginator::next_page`] call.
    pub fn list_accounts(&self, params: AccountListParams) -> Paginator<'_> {
        self.paginate("accounts", params.query_pairs(self.page_size))
    }

    /// Retrieves one account (`GET /accounts/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id and
    /// [`ApiError::UnexpectedResourceType`] if the server returns something
    /// other than an account.
    pub async fn retrieve_account(&self, id: &str) -> Result<Account, ApiError> {
        self.retrieve("accounts", id).await?.into_account()
    }

    /// Lists transactions across all accounts (`GET /transactions`).
    pub fn list_transactions(&self, params: &TransactionListParams) -> Paginator<'_> {
        self.paginate("transactions", params.query_pairs(self.page_size))
    }

    /// Lists the transactions of one account
    /// (`GET /accounts/{id}/transactions`).
    pub fn list_account_transactions(
        &self,
        account_id: &str,
        params: &TransactionListParams,
    ) -> Paginator<'_> {
        self.paginate(
            &format!("accounts/{}/transactions", encode(account_id)),
            params.query_pairs(self.page_size),
        )
    }

    /// Retrieves one transaction (`GET /transactions/{id}`).
    ///
    /// # Errors
    ///
    /// See [`UpClient::retrieve_account`].
    pub async fn retrieve_transaction(&self, id: &str) -> Result<Transaction, ApiError> {
        self.retrieve("transactions", id).await?.into_transaction()
    }

    /// Lists categories (`GET /categories`), optionally only the children of
    /// `parent`. This endpoint is not paginated.
    ///
    /// # Errors
    ///
    /// Returns any [`ApiError`] the exchange or decoding produces.
    pub async fn list_categories(&self, parent: Option<&str>) -> Result<Page, ApiError> {
        let mut builder = HttpRequest::builder("categories");
        if let Some(parent) = parent {
            builder = builder.query_param("filter[parent]", parent);
        }
        let response = self.get(builder.build()?).await?;
        Document::parse(&response.body)?.into_page()
    }

    /// Retrieves one category (`GET /categories/{id}`).
    ///
    /// # Errors
    ///
    /// See [`UpClient::retrieve_account`].
    pub async fn retrieve_category(&self, id: &str) -> Result<Category, ApiError> {
        self.retrieve("categories", id).await?.into_category()
    }

    /// Lists tags (`GET /tags`).
    pub fn list_tags(&self, page_size: Option<PageSize>) -> Paginator<'_> {
        self.paginate("tags", page_only(page_size, self.page_size))
    }

    /// Lists webhooks (`GET /webhooks`).
    pub fn list_webhooks(&self, page_size: Option<PageSize>) -> Paginator<'_> {
        self.paginate("webhooks", page_only(page_size, self.page_size))
    }

    /// Retrieves one webhook (`GET /webhooks/{id}`).
    ///
    /// # Errors
    ///
    /// See [`UpClient::retrieve_account`].
    pub async fn retrieve_webhook(&self, id: &str) -> Result<Webhook, ApiError> {
        self.retrieve("webhooks", id).await?.into_webhook()
    }

    /// Lists the delivery logs of one webhook (`GET /webhooks/{id}/logs`).
    pub fn list_webhook_logs(
        &self,
        webhook_id: &str,
        page_size: Option<PageSize>,
    ) -> Paginator<'_> {
        self.paginate(
            &format!("webhooks/{}/logs", encode(webhook_id)),
            page_only(page_size, self.page_size),
        )
    }

    /// Fetches the page a cursor points to.
    ///
    /// # Errors
    ///
    /// Returns any [`ApiError`] the exchange or decoding produces.
    pub async fn follow_page(&self, cursor: &PageCursor) -> Result<Page, ApiError> {
        self.fetch_page(HttpRequest::follow(cursor.as_url())).await
    }

    /// Fetches a relationship's `related` link.
    ///
    /// # Errors
    ///
    /// Returns any [`ApiError`] the exchange or decoding produces.
    pub async fn fetch_related(&self, url: &str) -> Result<Document, ApiError> {
        let response = self.get(HttpRequest::follow(url)).await?;
        Document::parse(&response.body)
    }

    /// Sends one request and decodes the body as a listing page.
    pub(crate) async fn fetch_page(&self, request: HttpRequest) -> Result<Page, ApiError> {
        let response = self.get(request).await?;
        let page = Document::parse(&response.body)?.into_page()?;

        let raw = page.raw_resources().count();
        if raw > 0 {
            tracing::debug!(
                raw,
                total = page.len(),
                "Listing page contained resources of unrecognised types"
            );
        }

        Ok(page)
    }

    async fn retrieve(&self, collection: &str, id: &str) -> Result<Resource, ApiError> {
        let request = HttpRequest::builder(format!("{collection}/{}", encode(id))).build()?;
        let response = self.get(request).await?;
        Document::parse(&response.body)?.into_single()
    }

    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.http_client.request(request).await
    }

    fn paginate(&self, path: &str, query: Vec<(String, String)>) -> Paginator<'_> {
        match HttpRequest::builder(path).query_pairs(query).build() {
            Ok(request) => Paginator::new(self, request),
            Err(e) => Paginator::failed(self, e.into()),
        }
    }
}

fn encode(segment: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(segment)
}
