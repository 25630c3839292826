//! Axum server for the event search API
//!
//! A single JSON endpoint with permissive CORS so browser clients served from
//! another origin can call it.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use logseek_core::config::ServerConfig;
use logseek_search::EventIndex;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::errors::ServiceError;
use crate::handlers::search_events;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Read-only event index
    pub index: Arc<EventIndex>,
}

/// Builds the service router over an event index.
pub fn router(index: EventIndex) -> Router {
    let state = AppState {
        index: Arc::new(index),
    };

    Router::new()
        .route("/search", get(search_events))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds to the configured address and serves until Ctrl-C.
///
/// # Errors
/// - `ServiceError::Bind` - Address is invalid or already in use
/// - `ServiceError::Serve` - Server stopped with an I/O error
pub async fn run_server(config: &ServerConfig, index: EventIndex) -> Result<(), ServiceError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServiceError::Bind {
            addr: addr.clone(),
            source,
        })?;

    let local_addr = listener.local_addr()?;
    tracing::info!(records = index.len(), "Search service running on http://{local_addr}");

    axum::serve(listener, router(index))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Search service stopped");
    Ok(())
}

/// Serves on an already bound listener until the task is dropped.
///
/// # Errors
/// - `ServiceError::Serve` - Server stopped with an I/O error
pub async fn serve(listener: TcpListener, index: EventIndex) -> Result<(), ServiceError> {
    axum::serve(listener, router(index)).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
