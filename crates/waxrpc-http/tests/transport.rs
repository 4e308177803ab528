//! ReqwestTransport against a local mock node.

use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::{json, Value};
use waxrpc_core::config::{with_global_timeout, with_proxies, ClientConfig};
use waxrpc_core::{CallContext, Executor, HttpRequest, HttpTransport, Method, SdkError, TransportError};
use waxrpc_http::ReqwestTransport;

fn transport(config: ClientConfig) -> ReqwestTransport {
    ReqwestTransport::new(&config).unwrap()
}

#[tokio::test]
async fn status_and_body_pass_through() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/v1/chain/get_info");
        then.status(404).body("unknown endpoint");
    });

    let req = HttpRequest::new(Method::Get, &server.url("/v1/chain/get_info")).unwrap();
    let resp = transport(ClientConfig::default()).send(&req).await.unwrap();

    assert_eq!(resp.status, 404);
    assert_eq!(resp.body_bytes(), b"unknown endpoint");
    mock.assert();
}

#[tokio::test]
async fn post_sends_json_body_and_content_type() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chain/get_table_rows")
            .header("content-type", "application/json")
            .json_body(json!({"code": "eosio"}));
        then.status(200).json_body(json!({"rows": []}));
    });

    let req = HttpRequest::new(Method::Post, &server.url("/v1/chain/get_table_rows"))
        .unwrap()
        .with_body(br#"{"code":"eosio"}"#.to_vec());
    let resp = transport(ClientConfig::default()).send(&req).await.unwrap();

    assert!(resp.is_success());
    mock.assert();
}

#[tokio::test]
async fn global_timeout_aborts_slow_node() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/slow");
        then.status(200).delay(Duration::from_secs(2)).body("{}");
    });

    let config = ClientConfig::from_options([with_global_timeout(Duration::from_millis(100))]).unwrap();
    let req = HttpRequest::new(Method::Get, &server.url("/slow")).unwrap();
    let err = transport(config).send(&req).await.unwrap_err();

    assert!(matches!(err, TransportError::Timeout { ms: 100 }), "{err}");
}

#[tokio::test]
async fn per_call_deadline_is_tighter_than_global_timeout() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/slow");
        then.status(200).delay(Duration::from_secs(2)).body("{}");
    });

    let config = ClientConfig::from_options([with_global_timeout(Duration::from_secs(30))]).unwrap();
    let exec = Executor::new(Arc::new(transport(config)));
    let ctx = CallContext::with_timeout(Duration::from_millis(100));

    let err = exec.get::<Value>(&ctx, &server.url("/slow")).await.unwrap_err();
    assert!(matches!(err, SdkError::Transport(TransportError::DeadlineExceeded)), "{err}");
}

#[tokio::test]
async fn unreachable_proxy_fails_the_call() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/chain/get_info");
        then.status(200).json_body(json!({}));
    });

    let config = ClientConfig::from_options([
        with_proxies(["http://127.0.0.1:9"]),
        with_global_timeout(Duration::from_secs(5)),
    ])
    .unwrap();
    let req = HttpRequest::new(Method::Get, &server.url("/v1/chain/get_info")).unwrap();
    let err = transport(config).send(&req).await.unwrap_err();

    assert!(matches!(err, TransportError::Http(_) | TransportError::Timeout { .. }), "{err}");
}

#[tokio::test]
async fn executor_decodes_through_reqwest() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/chain/get_info");
        then.status(202).json_body(json!({"head_block_num": 42}));
    });

    let exec = Executor::new(Arc::new(transport(ClientConfig::default())));
    let value: Value = exec
        .get(&CallContext::background(), &server.url("/v1/chain/get_info"))
        .await
        .unwrap();
    assert_eq!(value["head_block_num"], json!(42));
}

#[tokio::test]
async fn executor_reports_server_error_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/chain/get_info");
        then.status(500).body(r#"{"code":500,"message":"Internal Service Error"}"#);
    });

    let url = server.url("/v1/chain/get_info");
    let exec = Executor::new(Arc::new(transport(ClientConfig::default())));
    let err = exec.get::<Value>(&CallContext::background(), &url).await.unwrap_err();

    let msg = err.request_error().expect("unexpected status");
    assert_eq!(msg.request_url, url);
    assert_eq!(msg.status_code, 500);
    assert_eq!(msg.body, r#"{"code":500,"message":"Internal Service Error"}"#);
}
