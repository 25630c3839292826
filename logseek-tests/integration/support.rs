//! Shared helpers for spawning local test servers.

use std::collections::HashMap;

use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use logseek_search::{EventId, NanoTimestamp, SearchOutcome, SearchResult};
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral port and returns its base URL.
pub async fn spawn_router(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

pub fn record(id: &str, message: &str, timestamp: i64) -> SearchResult {
    SearchResult {
        event_id: EventId::from(id),
        message: message.to_string(),
        timestamp: NanoTimestamp(timestamp),
    }
}

/// Service stub with one route per response shape the client must handle.
pub fn stub_router() -> Router {
    Router::new()
        .route("/ok", get(|| async { Json(hello_payload()) }))
        .route(
            "/error",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/not-found", get(|| async { StatusCode::NOT_FOUND }))
        .route("/malformed", get(|| async { "{\"results\": [" }))
        .route(
            "/missing-fields",
            get(|| async { Json(serde_json::json!({ "results": [] })) }),
        )
        .route("/echo", get(echo_query))
        .route("/flaky", get(flaky))
}

/// Rejects the query `fail` and answers the hello payload otherwise.
async fn flaky(Query(params): Query<HashMap<String, String>>) -> axum::response::Response {
    if params.get("q").is_some_and(|q| q == "fail") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    Json(hello_payload()).into_response()
}

/// Responds with one result whose message is the decoded `q` parameter.
async fn echo_query(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let query = params.get("q").cloned().unwrap_or_default();
    Json(SearchOutcome::new(vec![record("echo", &query, 1)], 0.5))
}

pub fn hello_payload() -> serde_json::Value {
    serde_json::json!({
        "results": [{ "EventId": "e1", "Message": "hello", "NanoTimeStamp": 123456789 }],
        "count": 1,
        "time_ms": 4.2
    })
}
