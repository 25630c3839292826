//! HTTP request handlers

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::server::AppState;

/// Body of the 400 response for a missing or empty `q`.
pub const MISSING_QUERY_MESSAGE: &str = "Missing query parameter 'q'";

/// `GET /search?q=` - AND search over the loaded events.
///
/// Responds with `{results, count, time_ms}`. A query made only of whitespace
/// has no terms and yields an empty outcome rather than an error.
pub async fn search_events(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some(query) = params.get("q").filter(|q| !q.is_empty()) else {
        tracing::debug!("Rejected search without query");
        return (StatusCode::BAD_REQUEST, MISSING_QUERY_MESSAGE).into_response();
    };

    let outcome = state.index.search(query);
    tracing::debug!(
        terms = query.split_whitespace().count(),
        count = outcome.count,
        time_ms = outcome.time_ms,
        "Search served"
    );

    Json(outcome).into_response()
}
