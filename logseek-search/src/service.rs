//! Search service facade shared by the session controller.

use std::sync::Arc;

use crate::errors::SearchError;
use crate::providers::{DemoProvider, HttpSearchProvider, SearchProvider};
use crate::types::SearchOutcome;

/// Cloneable handle to the active search provider.
///
/// Clones share the same provider, so concurrent requests issued from
/// spawned tasks reuse one HTTP connection pool.
#[derive(Debug, Clone)]
pub struct SearchService {
    provider: Arc<dyn SearchProvider>,
}

impl SearchService {
    /// Creates search service talking to the default local search endpoint.
    pub fn new() -> Self {
        Self::with_provider(Arc::new(HttpSearchProvider::new()))
    }

    /// Creates search service with demo data for development.
    ///
    /// Answers from built-in sample events without any network calls.
    pub fn new_demo() -> Self {
        Self::with_provider(Arc::new(DemoProvider::new()))
    }

    /// Creates search service around a specific provider.
    pub fn with_provider(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Search events using raw query text.
    ///
    /// # Errors
    /// - `SearchError::RequestRejected` - Service answered with a non-success status
    /// - `SearchError::Transport` - Network failure or undecodable response
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, SearchError> {
        self.provider.search(query).await
    }
}

impl Default for SearchService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ScriptedProvider;

    #[tokio::test]
    async fn test_demo_service() {
        let service = SearchService::new_demo();
        let outcome = service.search("backup").await.unwrap();
        assert_eq!(outcome.count, 1);
    }

    #[tokio::test]
    async fn test_clones_share_provider() {
        let (provider, mut requests) = ScriptedProvider::new();
        let service = SearchService::with_provider(Arc::new(provider));
        let clone = service.clone();

        let call = tokio::spawn(async move { clone.search("shared").await });
        let request = requests.recv().await.unwrap();
        assert_eq!(request.query, "shared");

        request.fail(SearchError::transport("network down"));
        assert_eq!(
            call.await.unwrap().unwrap_err().failure_message(),
            "network down"
        );
    }
}
