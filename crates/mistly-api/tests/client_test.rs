#![allow(clippy::unwrap_used)]
// Integration tests for `MistClient` using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mistly_api::{Endpoint, Error, MistClient, ReadOnly, ReadWrite, TransportConfig, probe};

// ── Helpers ─────────────────────────────────────────────────────────

fn token() -> SecretString {
    SecretString::from("abcd1234wxyz")
}

async fn setup_read_only() -> (MockServer, MistClient<ReadOnly>) {
    let server = MockServer::start().await;
    let client =
        MistClient::read_only(&server.uri(), &token(), &TransportConfig::default()).unwrap();
    (server, client)
}

async fn setup_read_write() -> (MockServer, MistClient<ReadWrite>) {
    let server = MockServer::start().await;
    let client =
        MistClient::read_write(&server.uri(), &token(), &TransportConfig::default()).unwrap();
    (server, client)
}

// ── read ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_read_returns_body_unchanged() {
    let (server, client) = setup_read_only().await;

    let body = json!([
        { "id": "s-1", "name": "HQ", "extra": { "nested": [1, 2, 3] } },
        { "id": "s-2", "name": "Branch", "extra": null }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/v1/orgs/o-1/sites"))
        .and(header("Authorization", "Token abcd1234wxyz"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let url = client.url(Endpoint::OrgSites("o-1")).unwrap();
    let value = client.read(url).await.unwrap();

    assert_eq!(value, body);
}

#[tokio::test]
async fn test_read_with_query() {
    let (server, client) = setup_read_only().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sites/s-1/clients/sessions/search"))
        .and(query_param("client_manufacture", "Apple"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let url = client
        .url_with_query(
            Endpoint::SiteClientSessionSearch("s-1"),
            &[("client_manufacture", "Apple")],
        )
        .unwrap();
    let value = client.read(url).await.unwrap();

    assert_eq!(value, json!({ "results": [] }));
}

#[tokio::test]
async fn test_read_non_200_carries_status_and_url() {
    let (server, client) = setup_read_only().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/orgs/nope/inventory"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let url = client.url(Endpoint::OrgInventory("nope")).unwrap();
    let err = client.read(url.clone()).await.unwrap_err();

    match err {
        Error::Api {
            status,
            url: err_url,
            body,
        } => {
            assert_eq!(status, 404);
            assert_eq!(err_url, url);
            assert_eq!(body, "not found");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_read_unauthorized_is_auth_rejected() {
    let (server, client) = setup_read_only().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/self"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "bad token" })))
        .mount(&server)
        .await;

    let url = client.url(Endpoint::SelfInfo).unwrap();
    let err = client.read(url).await.unwrap_err();

    assert!(err.is_auth_rejected(), "expected auth rejection, got: {err:?}");
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_read_other_2xx_is_still_an_error() {
    let (server, client) = setup_read_only().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/self/apitokens"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let url = client.url(Endpoint::ApiTokens).unwrap();
    let err = client.read(url).await.unwrap_err();

    assert_eq!(err.status(), Some(204));
}

#[tokio::test]
async fn test_read_invalid_json_is_deserialization_error() {
    let (server, client) = setup_read_only().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/self"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let url = client.url(Endpoint::SelfInfo).unwrap();
    let err = client.read(url).await.unwrap_err();

    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

// ── create / update / delete ────────────────────────────────────────

#[tokio::test]
async fn test_create_without_body() {
    let (server, client) = setup_read_write().await;

    let created = json!({ "id": "t-new", "key": "zzzzfullkeyzzzz" });

    Mock::given(method("POST"))
        .and(path("/api/v1/self/apitokens"))
        .and(header("Authorization", "Token abcd1234wxyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&created))
        .expect(1)
        .mount(&server)
        .await;

    let url = client.url(Endpoint::ApiTokens).unwrap();
    let value = client.create(url, None).await.unwrap();

    assert_eq!(value, created);
}

#[tokio::test]
async fn test_create_with_body() {
    let (server, client) = setup_read_write().await;

    let payload = json!({ "name": "reporting" });

    Mock::given(method("POST"))
        .and(path("/api/v1/self/apitokens"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "t-2" })))
        .expect(1)
        .mount(&server)
        .await;

    let url = client.url(Endpoint::ApiTokens).unwrap();
    let value = client.create(url, Some(&payload)).await.unwrap();

    assert_eq!(value["id"], "t-2");
}

#[tokio::test]
async fn test_update_sends_put_body() {
    let (server, client) = setup_read_write().await;

    let payload = json!({ "name": "renamed" });

    Mock::given(method("PUT"))
        .and(path("/api/v1/self/apitokens/t-1"))
        .and(body_json(&payload))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "t-1", "name": "renamed" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let url = client.url(Endpoint::ApiToken("t-1")).unwrap();
    let value = client.update(url, &payload).await.unwrap();

    assert_eq!(value["name"], "renamed");
}

#[tokio::test]
async fn test_delete_empty_body_is_null() {
    let (server, client) = setup_read_write().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/self/apitokens/t-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let url = client.url(Endpoint::ApiToken("t-1")).unwrap();
    let value = client.delete(url).await.unwrap();

    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn test_delete_failure_carries_status_and_url() {
    let (server, client) = setup_read_write().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/self/apitokens/t-1"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let url = client.url(Endpoint::ApiToken("t-1")).unwrap();
    let err = client.delete(url.clone()).await.unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert_eq!(err.url(), Some(&url));
}

// ── Transport ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_timeout_is_a_connection_error() {
    let server = MockServer::start().await;
    let client = MistClient::read_only(
        &server.uri(),
        &token(),
        &TransportConfig::default().with_timeout(Duration::from_millis(100)),
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/self"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let url = client.url(Endpoint::SelfInfo).unwrap();
    let err = client.read(url).await.unwrap_err();

    assert!(err.is_connection(), "expected timeout, got: {err:?}");
}

#[tokio::test]
async fn test_probe_reachable_reports_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let base = url::Url::parse(&server.uri()).unwrap();
    let status = probe::reachable(&base, Duration::from_secs(1)).await.unwrap();

    assert_eq!(status.as_u16(), 404);
}

#[tokio::test]
async fn test_resolve_localhost() {
    let addrs = probe::resolve_host("localhost").await.unwrap();
    assert!(!addrs.is_empty());
}
