//! HTTP provider against a live stub service.

use std::time::Duration;

use logseek_search::{EventId, HttpSearchProvider, NanoTimestamp, SearchError, SearchProvider};
use tokio_test::assert_ok;

use crate::support::{spawn_router, stub_router};

async fn provider_for(path: &str) -> HttpSearchProvider {
    let base = spawn_router(stub_router()).await;
    HttpSearchProvider::with_config(
        &format!("{base}{path}"),
        "q",
        Duration::from_secs(5),
        "logseek-test",
    )
    .unwrap()
}

#[tokio::test]
async fn test_success_payload_decodes() {
    let provider = provider_for("/ok").await;
    let outcome = assert_ok!(provider.search("hello").await);

    assert_eq!(outcome.count, 1);
    assert_eq!(outcome.time_ms, 4.2);
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].event_id, EventId::from("e1"));
    assert_eq!(outcome.results[0].message, "hello");
    assert_eq!(outcome.results[0].timestamp, NanoTimestamp(123_456_789));
}

#[tokio::test]
async fn test_non_success_status_is_rejection() {
    for path in ["/error", "/not-found"] {
        let provider = provider_for(path).await;
        let error = provider.search("x").await.unwrap_err();
        assert_eq!(error, SearchError::RequestRejected, "{path}");
        assert_eq!(error.failure_message(), "Search failed");
    }
}

#[tokio::test]
async fn test_undecodable_body_is_transport_failure() {
    for path in ["/malformed", "/missing-fields"] {
        let provider = provider_for(path).await;
        match provider.search("x").await {
            Err(SearchError::Transport { reason }) => assert!(!reason.is_empty(), "{path}"),
            other => panic!("{path}: expected transport failure, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_query_text_survives_encoding() {
    let provider = provider_for("/echo").await;

    for text in ["a&b=c", "100% #1", "path/to?x", "  spaced  ", "日本語 ログ", ""] {
        let outcome = provider.search(text).await.unwrap();
        assert_eq!(outcome.results[0].message, text);
    }
}

#[tokio::test]
async fn test_endpoint_with_existing_query_string() {
    let base = spawn_router(stub_router()).await;
    let provider = HttpSearchProvider::with_config(
        &format!("{base}/echo?source=test"),
        "q",
        Duration::from_secs(5),
        "logseek-test",
    )
    .unwrap();

    let outcome = provider.search("disk full").await.unwrap();
    assert_eq!(outcome.results[0].message, "disk full");
}
