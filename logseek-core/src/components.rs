//! Component wiring for the search session.
//!
//! Services are created based on runtime mode (Production vs Development) and
//! handed to the session, which stays mode-agnostic.

use std::sync::Arc;

use logseek_search::{HttpSearchProvider, SearchService};

use crate::config::{LogseekConfig, ServiceConfig};
use crate::mode::RuntimeMode;
use crate::session::{SearchSessionHandle, spawn_search_session};
use crate::Result;

/// Builds the search service for the given mode.
///
/// # Errors
/// - `LogseekError::Configuration` - Service configuration is invalid
/// - `LogseekError::Search` - HTTP client could not be constructed
pub fn build_search_service(config: &ServiceConfig, mode: RuntimeMode) -> Result<SearchService> {
    match mode {
        RuntimeMode::Development => {
            tracing::info!("Using demo search data");
            Ok(SearchService::new_demo())
        }
        RuntimeMode::Production => {
            config.validate()?;
            let provider = HttpSearchProvider::with_config(
                &config.endpoint,
                &config.query_param,
                config.request_timeout,
                config.user_agent,
            )?;
            tracing::info!(endpoint = %config.endpoint, "Using search service");
            Ok(SearchService::with_provider(Arc::new(provider)))
        }
    }
}

/// Builds the search service and spawns a session on it.
///
/// # Errors
/// - `LogseekError::Configuration` - Service configuration is invalid
/// - `LogseekError::Search` - HTTP client could not be constructed
pub fn start_session(config: &LogseekConfig, mode: RuntimeMode) -> Result<SearchSessionHandle> {
    let service = build_search_service(&config.service, mode)?;
    Ok(spawn_search_session(config.session.clone(), service))
}
