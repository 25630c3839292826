//! Provider implementations for event search.

use async_trait::async_trait;

use crate::errors::SearchError;
use crate::types::SearchOutcome;

pub mod demo;
pub mod http;
#[cfg(any(test, feature = "test-utils"))]
pub mod scripted;

pub use demo::DemoProvider;
pub use http::HttpSearchProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use scripted::{ScriptedProvider, ScriptedRequest};

/// Trait for event search providers.
///
/// Implementations answer one query per call through different backends
/// (the remote search service, built-in demo data, scripted test doubles).
#[async_trait]
pub trait SearchProvider: Send + Sync + std::fmt::Debug {
    /// Runs one search for the raw (unencoded) query text.
    ///
    /// # Errors
    /// - `SearchError::RequestRejected` - Service answered with a non-success status
    /// - `SearchError::Transport` - Request failed or the response did not decode
    async fn search(&self, query: &str) -> Result<SearchOutcome, SearchError>;
}
