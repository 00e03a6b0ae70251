//! HTTP surface tests: subscription intake, key discovery, health.

mod fixtures;

use fixtures::TestServer;
use serde_json::json;

use roomcast_server::domain::SubscriptionStore;

#[tokio::test]
async fn test_subscribe_stores_subscription() {
    // given:
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when: a well-formed subscription arrives
    let response = client
        .post(format!("{}/subscribe", server.base_url()))
        .json(&json!({
            "username": "alice",
            "subscription": {
                "endpoint": "https://push.example/abc",
                "keys": {"p256dh": "pk", "auth": "ak"}
            }
        }))
        .send()
        .await
        .unwrap();

    // then: created, acknowledged, persisted
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"ok": true}));

    let subs = server.subscriptions.valid_for_user("alice").await.unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].endpoint, "https://push.example/abc");
    assert_eq!(subs[0].keys.p256dh, "pk");
}

#[tokio::test]
async fn test_subscribe_rejects_malformed_body() {
    // given:
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let url = format!("{}/subscribe", server.base_url());

    // when/then: not JSON
    let response = client
        .post(&url)
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    // when/then: missing keys
    let response = client
        .post(&url)
        .json(&json!({
            "username": "alice",
            "subscription": {"endpoint": "https://push.example/abc"}
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    // when/then: empty username
    let response = client
        .post(&url)
        .json(&json!({
            "username": "",
            "subscription": {
                "endpoint": "https://push.example/abc",
                "keys": {"p256dh": "pk", "auth": "ak"}
            }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    // when/then: empty endpoint
    let response = client
        .post(&url)
        .json(&json!({
            "username": "alice",
            "subscription": {
                "endpoint": "",
                "keys": {"p256dh": "pk", "auth": "ak"}
            }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    // and nothing was stored
    let subs = server.subscriptions.valid_for_user("alice").await.unwrap();
    assert!(subs.is_empty());
}

#[tokio::test]
async fn test_resubscribe_same_endpoint_is_idempotent() {
    // given:
    let server = TestServer::start().await;
    let client = reqwest::Client::new();
    let url = format!("{}/subscribe", server.base_url());
    let body = json!({
        "username": "alice",
        "subscription": {
            "endpoint": "https://push.example/abc",
            "keys": {"p256dh": "pk", "auth": "ak"}
        }
    });

    // when: the same subscription is posted twice
    for _ in 0..2 {
        let response = client.post(&url).json(&body).send().await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }

    // then: one record
    let subs = server.subscriptions.valid_for_user("alice").await.unwrap();
    assert_eq!(subs.len(), 1);
}

#[tokio::test]
async fn test_vapid_public_key() {
    // given:
    let server = TestServer::start().await;

    // when:
    let response = reqwest::get(format!("{}/vapidPublicKey", server.base_url()))
        .await
        .unwrap();

    // then:
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"key": "test-vapid-key"}));
}

#[tokio::test]
async fn test_health_check() {
    // given:
    let server = TestServer::start().await;

    // when:
    let response = reqwest::get(format!("{}/healthz", server.base_url()))
        .await
        .unwrap();

    // then:
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}
