//! High-level client for the Up Banking API.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`UpClient`]: Typed operations for each endpoint
//! - [`AccountListParams`]: Filters for [`UpClient::list_accounts`]
//! - [`TransactionListParams`]: Filters for transaction listings
//! - [`TransactionStatus`]: `HELD` or `SETTLED`
//!
//! # Endpoints
//!
//! | operation | request |
//! |---|---|
//! | [`UpClient::ping`] | `GET /util/ping` |
//! | [`UpClient::list_accounts`] | `GET /accounts` |
//! | [`UpClient::retrieve_account`] | `GET /accounts/{id}` |
//! | [`UpClient::list_transactions`] | `GET /transactions` |
//! | [`UpClient::list_account_transactions`] | `GET /accounts/{id}/transactions` |
//! | [`UpClient::retrieve_transaction`] | `GET /transactions/{id}` |
//! | [`UpClient::list_categories`] | `GET /categories` |
//! | [`UpClient::retrieve_category`] | `GET /categories/{id}` |
//! | [`UpClient::list_tags`] | `GET /tags` |
//! | [`UpClient::list_webhooks`] | `GET /webhooks` |
//! | [`UpClient::retrieve_webhook`] | `GET /webhooks/{id}` |
//! | [`UpClient::list_webhook_logs`] | `GET /webhooks/{id}/logs` |
//!
//! Listing filters that are not set are omitted from the query string.

mod client;
mod params;

pub use client::UpClient;
pub use params::{AccountListParams, TransactionListParams, TransactionStatus};
