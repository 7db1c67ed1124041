//! Integration tests for request construction and single-resource operations.
//!
//! These tests verify the headers, paths and query parameters the client
//! sends, and that single-resource responses decode into typed resources.

mod common;

use common::{account_json, category_json, client_for, page_json, TEST_TOKEN};
use serde_json::json;
use chrono::{TimeZone, Utc};
use serde_json::Value;
use up_api::{
    AccountListParams, AccountType, ApiError, InvalidHttpRequestError, OwnershipType, PageSize,
    ResourceType, TransactionListParams, TransactionStatus,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Returns the decoded query pairs of every request the server received.
async fn received_queries(server: &MockServer) -> Vec<Vec<(String, String)>> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| {
            request
                .url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        })
        .collect()
}

#[tokio::test]
async fn test_list_accounts_sends_auth_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts"))
        .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .and(header("Accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json(vec![account_json("a1", "Spending")], None)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client
        .list_accounts(AccountListParams::default())
        .next_page()
        .await
        .unwrap()
        .unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page.accounts().next().unwrap().attributes.display_name, "Spending");
}

#[tokio::test]
async fn test_list_accounts_sends_exactly_the_requested_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts"))
        .and(query_param("filter[accountType]", "TRANSACTIONAL"))
        .and(query_param("filter[ownershipType]", "JOINT"))
        .and(query_param("page[size]", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], None)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = AccountListParams {
        account_type: Some(AccountType::Transactional),
        ownership_type: Some(OwnershipType::Joint),
        page_size: None,
    };
    let page = client.list_accounts(params).next_page().await.unwrap().unwrap();
    assert!(page.is_empty());

    let queries = received_queries(&server).await;
    assert_eq!(queries.len(), 1);
    let query = &queries[0];
    assert_eq!(query.len(), 3, "unexpected query parameters: {query:?}");
    assert!(query.contains(&("page[size]".to_string(), "20".to_string())));
    assert!(query.contains(&("filter[accountType]".to_string(), "TRANSACTIONAL".to_string())));
    assert!(query.contains(&("filter[ownershipType]".to_string(), "JOINT".to_string())));
}

#[tokio::test]
async fn test_unset_filters_are_omitted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], None)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = AccountListParams {
        account_type: Some(AccountType::Saver),
        ..Default::default()
    };
    client.list_accounts(params).next_page().await.unwrap().unwrap();

    let query = &received_queries(&server).await[0];
    assert_eq!(
        query,
        &vec![
            ("page[size]".to_string(), "20".to_string()),
            ("filter[accountType]".to_string(), "SAVER".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_retrieve_account_decodes_typed_account() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/acc-123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": account_json("acc-123", "Bills")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let account = client.retrieve_account("acc-123").await.unwrap();

    assert_eq!(account.id, "acc-123");
    assert_eq!(account.attributes.account_type, AccountType::Transactional);
    assert_eq!(account.attributes.ownership_type, OwnershipType::Joint);
    assert_eq!(account.attributes.balance.currency_code(), "AUD");
    assert_eq!(account.attributes.balance.value_in_base_units(), 1000);
    assert_eq!(
        account.relationships.related_link("transactions"),
        Some("https://api.up.com.au/api/v1/accounts/acc-123/transactions")
    );
}

#[tokio::test]
async fn test_retrieve_account_of_other_type_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/cat-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": category_json("cat-1", "Games")})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.retrieve_account("cat-1").await.unwrap_err();

    assert!(matches!(
        error,
        ApiError::UnexpectedResourceType {
            expected: ResourceType::Accounts,
            found: ResourceType::Categories,
            ..
        }
    ));
}

#[tokio::test]
async fn test_list_account_transactions_uses_nested_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/acc-1/transactions"))
        .and(query_param("filter[status]", "HELD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], None)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = up_api::TransactionListParams {
        status: Some(up_api::TransactionStatus::Held),
        ..Default::default()
    };
    let page = client
        .list_account_transactions("acc-1", &params)
        .next_page()
        .await
        .unwrap()
        .unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_list_categories_with_parent_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/categories"))
        .and(query_param("filter[parent]", "good-life"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [category_json("games-and-software", "Games & Software")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client.list_categories(Some("good-life")).await.unwrap();

    let category = page.items()[0].as_category().unwrap();
    assert_eq!(category.attributes.name, "Games & Software");
    assert!(category.relationships.get("parent").unwrap().one().is_none());
}

#[tokio::test]
async fn test_fetch_related_follows_absolute_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/acc-1/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], None)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let document = client
        .fetch_related(&format!("{}/accounts/acc-1/transactions", server.uri()))
        .await
        .unwrap();
    assert!(document.into_page().unwrap().is_empty());
}

#[tokio::test]
async fn test_ping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/util/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"id": "ping-1", "statusEmoji": "⚡️"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ping = client.ping().await.unwrap();
    assert_eq!(ping.id, "ping-1");
    assert_eq!(ping.status_emoji, "⚡️");
}

fn transaction_json(id: &str, description: &str) -> Value {
    json!({
        "type": "transactions",
        "id": id,
        "attributes": {"status": "HELD", "description": description},
        "relationships": {
            "account": {"data": {"type": "accounts", "id": "acc-1"}}
        }
    })
}

fn webhook_json(id: &str, url: &str) -> Value {
    json!({
        "type": "webhooks",
        "id": id,
        "attributes": {
            "url": url,
            "description": "sync",
            "createdAt": "2024-05-02T08:00:00+10:00"
        },
        "relationships": {
            "logs": {"links": {"related": format!("https://api.up.com.au/api/v1/webhooks/{id}/logs")}}
        }
    })
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[tokio::test]
async fn test_list_transactions_sends_time_window_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![transaction_json("tx-1", "Coffee")],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = TransactionListParams {
        status: Some(TransactionStatus::Held),
        since: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        until: Some(Utc.with_ymd_and_hms(2024, 2, 1, 12, 30, 0).unwrap()),
        page_size: Some(PageSize::new(5).unwrap()),
        ..Default::default()
    };
    let page = client.list_transactions(&params).next_page().await.unwrap().unwrap();

    assert_eq!(
        received_queries(&server).await[0],
        pairs(&[
            ("page[size]", "5"),
            ("filter[status]", "HELD"),
            ("filter[since]", "2024-01-01T00:00:00Z"),
            ("filter[until]", "2024-02-01T12:30:00Z"),
        ])
    );

    let transaction = page.transactions().next().unwrap();
    assert_eq!(transaction.id, "tx-1");
    assert_eq!(transaction.attributes.get("description"), Some(&json!("Coffee")));
}

#[tokio::test]
async fn test_retrieve_transaction_encodes_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transactions/tx%2F1%20a"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": transaction_json("tx/1 a", "Rent")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let transaction = client.retrieve_transaction("tx/1 a").await.unwrap();

    assert_eq!(transaction.id, "tx/1 a");
    let account = transaction.relationships.get("account").unwrap().one().unwrap();
    assert_eq!(account.id, "acc-1");
}

#[tokio::test]
async fn test_retrieve_category() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/categories/takeaway"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": category_json("takeaway", "Takeaway")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let category = client.retrieve_category("takeaway").await.unwrap();
    assert_eq!(category.attributes.name, "Takeaway");
}

#[tokio::test]
async fn test_list_tags_uses_default_page_size() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![
                json!({"type": "tags", "id": "Holiday"}),
                json!({"type": "tags", "id": "Pizza Night"}),
            ],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client.list_tags(None).next_page().await.unwrap().unwrap();

    assert_eq!(received_queries(&server).await[0], pairs(&[("page[size]", "20")]));
    let labels: Vec<&str> = page
        .items()
        .iter()
        .filter_map(|item| item.as_tag())
        .map(|tag| tag.id.as_str())
        .collect();
    assert_eq!(labels, ["Holiday", "Pizza Night"]);
}

#[tokio::test]
async fn test_list_webhooks_with_page_size_override() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhooks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![webhook_json("wh-1", "https://example.com/hook")],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client
        .list_webhooks(Some(PageSize::new(3).unwrap()))
        .next_page()
        .await
        .unwrap()
        .unwrap();

    assert_eq!(received_queries(&server).await[0], pairs(&[("page[size]", "3")]));
    let webhook = page.webhooks().next().unwrap();
    assert_eq!(webhook.attributes.url, "https://example.com/hook");
    assert_eq!(webhook.attributes.description.as_deref(), Some("sync"));
}

#[tokio::test]
async fn test_retrieve_webhook_encodes_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhooks/wh%201"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": webhook_json("wh 1", "https://example.com/a")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let webhook = client.retrieve_webhook("wh 1").await.unwrap();
    assert_eq!(webhook.attributes.url, "https://example.com/a");
    assert!(webhook.relationships.related_link("logs").is_some());
}

#[tokio::test]
async fn test_list_webhook_logs_path_and_decode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhooks/wh%2F1/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![json!({
                "type": "webhook-delivery-logs",
                "id": "log-1",
                "attributes": {
                    "deliveryStatus": "DELIVERED",
                    "response": {"statusCode": 200, "body": "ok"}
                }
            })],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client
        .list_webhook_logs("wh/1", None)
        .next_page()
        .await
        .unwrap()
        .unwrap();

    assert_eq!(received_queries(&server).await[0], pairs(&[("page[size]", "20")]));
    let log = page.items()[0].as_webhook_delivery_log().unwrap();
    assert_eq!(log.id, "log-1");
    assert_eq!(log.attributes.get("deliveryStatus"), Some(&json!("DELIVERED")));
}

#[tokio::test]
async fn test_fetch_related_refuses_foreign_origin() {
    let server = MockServer::start().await;

    let client = client_for(&server);
    let error = client
        .fetch_related("https://attacker.test/api/v1/accounts/acc-1/transactions")
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ApiError::InvalidRequest(InvalidHttpRequestError::ForeignOrigin { .. })
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}
