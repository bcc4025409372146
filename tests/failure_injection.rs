//! Failure injection tests: every failure surfaces with the right shape.

use std::time::{Duration, Instant};

use httpkit::config::HttpKitConfig;
use httpkit::{HttpClient, HttpError, HttpRequest, HttpResponse};

mod common;

use common::MockResponse;

fn client() -> HttpClient {
    HttpClient::new(&HttpKitConfig::default())
}

#[tokio::test]
async fn slow_backend_hits_the_deadline() {
    let (addr, _) =
        common::start_mock_backend(MockResponse::ok("late").delay(Duration::from_secs(5))).await;

    let started = Instant::now();
    let failure = client()
        .execute(&HttpRequest::get(common::url(addr, "/")).timeout_secs(1))
        .await
        .unwrap_err();

    assert!(matches!(failure.error, HttpError::Timeout(d) if d == Duration::from_secs(1)));
    assert_eq!(failure.response, HttpResponse::default());
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn positional_zero_timeout_waits() {
    let (addr, _) = common::start_mock_backend(
        MockResponse::ok("eventually").delay(Duration::from_millis(1500)),
    )
    .await;

    let response = client()
        .fetch(&common::url(addr, "/"), "GET", None, "", "", false, "", 0, 0, false)
        .await
        .unwrap();
    assert_eq!(response.body, b"eventually");
}

#[tokio::test]
async fn connection_closed_mid_body() {
    let (addr, _) = common::start_mock_backend(
        MockResponse::ok("only ten b").declare_length(100),
    )
    .await;

    let failure = client()
        .execute(&HttpRequest::get(common::url(addr, "/")))
        .await
        .unwrap_err();

    assert!(matches!(failure.error, HttpError::Body(_)));
    assert!(!failure.error.is_early());
    assert_eq!(failure.response.status_code, 200);
    assert!(failure.response.body.len() <= 10);
    assert_eq!(failure.response.header("content-length"), Some("100"));
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let failure = client()
        .execute(&HttpRequest::get(common::url(addr, "/")).timeout_secs(5))
        .await
        .unwrap_err();

    assert!(matches!(failure.error, HttpError::Transport(_)));
    assert!(failure.error.is_early());
    assert_eq!(failure.response, HttpResponse::default());
}

#[tokio::test]
async fn invalid_proxy_fails_before_sending() {
    let (addr, log) = common::start_mock_backend(MockResponse::ok("unreached")).await;
    let client = client();

    let failure = client
        .execute(&HttpRequest::get(common::url(addr, "/")).proxy("http://[::1"))
        .await
        .unwrap_err();

    assert!(matches!(failure.error, HttpError::ProxyUrl { .. }));
    assert_eq!(failure.response.status_code, 0);
    assert!(log.lock().unwrap().is_empty());
    assert_eq!(client.pool().transport_count(), 0);
}

#[tokio::test]
async fn malformed_inputs_are_request_errors() {
    let client = client();

    for request in [
        HttpRequest::get("no scheme here"),
        HttpRequest::get("file:///etc/hosts"),
        HttpRequest::new("BAD METHOD", "http://127.0.0.1:1/"),
        HttpRequest::get("http://127.0.0.1:1/").headers("X-Broken: a\u{0}b"),
    ] {
        let failure = client.execute(&request).await.unwrap_err();
        assert!(
            matches!(failure.error, HttpError::Request(_)),
            "{:?} gave {}",
            request.url,
            failure.error
        );
        assert_eq!(failure.response, HttpResponse::default());
    }
}

#[tokio::test]
async fn failure_exposes_error_source() {
    let (addr, _) = common::start_mock_backend(
        MockResponse::ok("nope").header("Content-Encoding", "gzip"),
    )
    .await;

    let failure = client()
        .execute(&HttpRequest::get(common::url(addr, "/")))
        .await
        .unwrap_err();

    let source = std::error::Error::source(&failure).map(ToString::to_string);
    assert_eq!(source, Some(failure.error.to_string()));
    assert_eq!(failure.to_string(), "request failed");
    assert!(failure.error.to_string().starts_with("gzip decode failed"));
}
