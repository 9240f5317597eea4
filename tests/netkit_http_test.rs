use cvkit::config::HttpSettings;
use cvkit::netkit::{http_get, http_post_json, post, HttpClient, JSON_CONTENT_TYPE};
use httpmock::prelude::*;
use std::collections::HashMap;

#[tokio::test]
async fn test_get_sends_query_params() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/orders")
            .query_param("page", "2")
            .query_param("size", "20");
        then.status(200).body(r#"{"total":41}"#);
    });

    let body = http_get(&server.url("/orders"), &[("page", "2"), ("size", "20")])
        .await
        .unwrap();

    mock.assert();
    assert_eq!(body, r#"{"total":41}"#);
}

#[tokio::test]
async fn test_post_json_sets_content_type() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/notify")
            .header("content-type", JSON_CONTENT_TYPE)
            .json_body(serde_json::json!({"event": "paid"}));
        then.status(200).body("ok");
    });

    let body = http_post_json(&server.url("/notify"), br#"{"event":"paid"}"#)
        .await
        .unwrap();

    mock.assert();
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn test_post_map_with_headers() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/login")
            .header("x-trace-id", "abc123")
            .json_body(serde_json::json!({"user": "li", "pwd": "x"}));
        then.status(201).body("created");
    });

    let data = HashMap::from([
        ("user".to_string(), "li".to_string()),
        ("pwd".to_string(), "x".to_string()),
    ]);
    let headers = HashMap::from([("X-Trace-Id".to_string(), "abc123".to_string())]);
    let body = post(&server.url("/login"), &data, &headers).await.unwrap();

    mock.assert();
    assert_eq!(body, b"created");
}

#[tokio::test]
async fn test_error_status_still_returns_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/missing");
        then.status(404).body("not found");
    });

    let body = http_get(&server.url("/missing"), &[]).await.unwrap();
    assert_eq!(body, "not found");
}

#[tokio::test]
async fn test_client_sends_configured_user_agent() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/ua").header("user-agent", "cvkit-it");
        then.status(200).body("hi");
    });

    let client = HttpClient::new(&HttpSettings {
        user_agent: Some("cvkit-it".to_string()),
        ..HttpSettings::default()
    })
    .unwrap();
    assert_eq!(client.get(&server.url("/ua"), &[]).await.unwrap(), "hi");
    mock.assert();
}

#[test]
fn test_unreachable_host_is_error() {
    let client = HttpClient::new(&HttpSettings {
        timeout_seconds: 1,
        ..HttpSettings::default()
    })
    .unwrap();
    let result = tokio_test::block_on(client.get("http://127.0.0.1:9/", &[]));
    assert!(result.is_err());
}
