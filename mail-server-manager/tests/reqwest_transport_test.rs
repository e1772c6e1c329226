//! ReqwestTransport 测试（本地 HTTP mock 服务器）

use std::time::Duration;

use std::net::TcpListener;

use httpmock::prelude::*;
use mail_server_manager::{
    ApiRequest, HttpMethod, HttpTransport, MailcowManager, ReqwestTransport, ServerError,
    ServerManager, TransportOptions,
};
use serde_json::json;

fn transport() -> ReqwestTransport {
    ReqwestTransport::new(TransportOptions::default(), "Mailcow").expect("创建传输层失败")
}

#[tokio::test(flavor = "multi_thread")]
async fn post_sends_key_content_type_and_json_body() {
    let server = MockServer::start_async().await;

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/edit/domain")
            .header("X-API-Key", "test-api-key")
            .header("Content-Type", "application/json")
            .json_body(json!({ "items": "example.com", "attr": { "active": "0" } }));
        then.status(200)
            .body(r#"[{"type":"success","msg":["domain_modified","example.com"]}]"#);
    });

    let request = ApiRequest::new(HttpMethod::Post, server.url("/api/v1/edit/domain"))
        .header("X-API-Key", "test-api-key")
        .header("Content-Type", "application/json")
        .json(json!({ "items": "example.com", "attr": { "active": "0" } }));

    let response = transport().send(request, "Mailcow").await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status, 200);
    assert!(response.body.contains("domain_modified"));
}

#[tokio::test(flavor = "multi_thread")]
async fn get_returns_body_verbatim() {
    let server = MockServer::start_async().await;

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/get/status/version")
            .header("X-API-Key", "test-api-key");
        then.status(200).body(r#"{"version":"2024-04a"}"#);
    });

    let request = ApiRequest::new(HttpMethod::Get, server.url("/api/v1/get/status/version"))
        .header("X-API-Key", "test-api-key");

    let response = transport().send(request, "Mailcow").await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.body, r#"{"version":"2024-04a"}"#);
}

#[tokio::test(flavor = "multi_thread")]
async fn non_2xx_status_still_returns_body() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/get/status/version");
        then.status(401)
            .body(r#"{"type":"error","msg":"authentication failed"}"#);
    });

    let request = ApiRequest::new(HttpMethod::Get, server.url("/api/v1/get/status/version"));
    let response = transport().send(request, "Mailcow").await.unwrap();

    assert_eq!(response.status, 401);
    assert!(response.body.contains("authentication failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_server_times_out() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/get/status/version");
        then.status(200)
            .delay(Duration::from_millis(500))
            .body("{}");
    });

    let options = TransportOptions {
        timeout: Duration::from_millis(100),
        ..TransportOptions::default()
    };
    let transport = ReqwestTransport::new(options, "Mailcow").unwrap();

    let request = ApiRequest::new(HttpMethod::Get, server.url("/api/v1/get/status/version"));
    let err = transport.send(request, "Mailcow").await.unwrap_err();

    assert!(matches!(err, ServerError::Timeout { ref server_type, .. } if server_type == "Mailcow"));
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_host_is_network_error() {
    // 端口 9 (discard) 在测试环境中不会有服务监听
    let request = ApiRequest::new(HttpMethod::Get, "http://127.0.0.1:9/api/v1/get/status/version");
    let err = transport().send(request, "Mailcow").await.unwrap_err();

    assert!(matches!(err, ServerError::NetworkError { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn from_client_uses_caller_configured_client() {
    let server = MockServer::start_async().await;

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/get/status/version")
            .header("user-agent", "billing-host/1.0");
        then.status(200).body(r#"{"version":"2024-04a"}"#);
    });

    let client = reqwest::Client::builder()
        .user_agent("billing-host/1.0")
        .build()
        .unwrap();
    let transport = ReqwestTransport::from_client(client);

    let request = ApiRequest::new(HttpMethod::Get, server.url("/api/v1/get/status/version"));
    let response = transport.send(request, "Mailcow").await.unwrap();

    mock.assert_async().await;
    assert!(response.body.contains("version"));
}

#[tokio::test(flavor = "multi_thread")]
async fn builder_timeout_applies_to_manager_requests() {
    // 接受 TCP 连接但从不响应 TLS 握手
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let host = listener.local_addr().unwrap().to_string();

    let manager = MailcowManager::builder(host, "test-api-key")
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let started = std::time::Instant::now();
    let err = manager.test_connection().await.unwrap_err();

    assert!(
        matches!(err, ServerError::Timeout { ref server_type, .. } if server_type == "Mailcow"),
        "unexpected error: {err:?}"
    );
    assert!(started.elapsed() < Duration::from_secs(5));
    drop(listener);
}
