//! # Up Banking API Rust Client
//!
//! A typed async Rust client for the Up Banking API, covering request
//! authentication, polymorphic resource decoding, cursor pagination,
//! rate-limit tracking and a typed error taxonomy.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`UpConfig`] and [`UpConfigBuilder`]
//! - Validated newtypes for the access token, base URL and page size
//! - [`UpClient`] with one typed operation per endpoint
//! - Lazy, forward-only pagination via [`Paginator`]
//! - A closed [`Resource`] union with a raw fallback for unknown types
//! - Money amounts checked against their minor-unit integer form
//! - Rate-limit tracking with a configurable [`RateLimitPolicy`]
//! - A single [`ApiError`] type whose [`ErrorKind`] tells callers what to retry
//!
//! ## Quick Start
//!
//! ```rust
//! use up_api::{AccessToken, PageSize, UpConfig};
//!
//! let config = UpConfig::builder()
//!     .token(AccessToken::new("up:yeah:your-token").unwrap())
//!     .page_size(PageSize::new(50).unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://api.up.com.au/api/v1");
//! ```
//!
//! ## Listing Accounts
//!
//! ```rust,ignore
//! use up_api::{AccountListParams, AccountType, OwnershipType, UpClient};
//!
//! let client = UpClient::new(&config)?;
//! let mut pages = client.list_accounts(AccountListParams {
//!     account_type: Some(AccountType::Transactional),
//!     ownership_type: Some(OwnershipType::Joint),
//!     ..Default::default()
//! });
//!
//! while let Some(page) = pages.next_page().await {
//!     for account in page?.accounts() {
//!         println!("{} {}", account.attributes.display_name, account.attributes.balance);
//!     }
//! }
//! ```
//!
//! ## Handling Errors
//!
//! ```rust,ignore
//! use up_api::ApiError;
//!
//! match client.retrieve_account("missing").await {
//!     Err(ApiError::NotFound { .. }) => println!("no such account"),
//!     Err(e) if e.is_retryable() => println!("retry later: {e}"),
//!     Err(e) => return Err(e.into()),
//!     Ok(account) => println!("{}", account.id),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All client types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No hidden retries**: Each call performs exactly one exchange

pub mod clients;
pub mod config;
pub mod error;
pub mod pagination;
pub mod resources;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, BaseUrl, PageSize, RateLimitPolicy, UpConfig, UpConfigBuilder, DEFAULT_BASE_URL,
    DEFAULT_PAGE_SIZE,
};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    AccountListParams, Admission, ApiError, ErrorDetail, ErrorKind, ErrorSource, HttpClient,
    HttpRequest, HttpRequestBuilder, HttpResponse, InvalidHttpRequestError, RateLimitState,
    RateLimiter, RequestTarget, TransactionListParams, TransactionStatus, UpClient,
};
pub use pagination::{Paginator, PaginatorState};

// Re-export resource types
pub use resources::{
    Account, AccountAttributes, AccountType, Category, CategoryAttributes, Document,
    DocumentLinks, MoneyError, MoneyObject, OpaqueAttributes, OwnershipType, Page, PageCursor,
    PingResponse, PrimaryData, RawResource, Relationship, RelationshipData, Relationships,
    Resource, ResourceIdentifier, ResourceLinks, ResourceObject, ResourceType, Tag,
    TagAttributes, Transaction, Webhook, WebhookAttributes, WebhookDeliveryLog, WebhookEvent,
};
