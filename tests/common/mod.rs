//! Shared fixtures for integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use up_api::{AccessToken, BaseUrl, RateLimitPolicy, UpClient, UpConfig};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "up:yeah:test-token";

/// Creates a client pointed at the mock server.
pub fn client_for(server: &MockServer) -> UpClient {
    client_with_policy(server, RateLimitPolicy::FailFast)
}

/// Creates a client pointed at the mock server with the given rate-limit policy.
pub fn client_with_policy(server: &MockServer, policy: RateLimitPolicy) -> UpClient {
    let config = UpConfig::builder()
        .token(AccessToken::new(TEST_TOKEN).unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .rate_limit_policy(policy)
        .build()
        .unwrap();
    UpClient::new(&config).unwrap()
}

/// An `accounts` resource object.
pub fn account_json(id: &str, name: &str) -> Value {
    json!({
        "type": "accounts",
        "id": id,
        "attributes": {
            "displayName": name,
            "accountType": "TRANSACTIONAL",
            "ownershipType": "JOINT",
            "balance": {
                "currencyCode": "AUD",
                "value": "10.00",
                "valueInBaseUnits": 1000
            },
            "createdAt": "2024-01-01T00:00:00+11:00"
        },
        "relationships": {
            "transactions": {
                "links": {
                    "related": format!("https://api.up.com.au/api/v1/accounts/{id}/transactions")
                }
            }
        },
        "links": {
            "self": format!("https://api.up.com.au/api/v1/accounts/{id}")
        }
    })
}

/// A `categories` resource object.
pub fn category_json(id: &str, name: &str) -> Value {
    json!({
        "type": "categories",
        "id": id,
        "attributes": {"name": name},
        "relationships": {
            "parent": {"data": null},
            "children": {"data": []}
        }
    })
}

/// A listing document.
pub fn page_json(items: Vec<Value>, next: Option<String>) -> Value {
    json!({
        "data": items,
        "links": {"prev": null, "next": next}
    })
}

/// A JSON:API error document with one error.
pub fn error_json(status: u16, title: &str, detail: &str) -> Value {
    json!({
        "errors": [{
            "status": status.to_string(),
            "title": title,
            "detail": detail
        }]
    })
}
