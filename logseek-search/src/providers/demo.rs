//! Demo provider for development without a running search service.

use std::time::Duration;

use async_trait::async_trait;

use super::SearchProvider;
use crate::errors::SearchError;
use crate::index::EventIndex;
use crate::types::SearchOutcome;

/// Demo provider answering from built-in sample events.
///
/// Adds a small artificial latency so the loading state is visible when
/// developing the terminal page.
#[derive(Debug)]
pub struct DemoProvider {
    index: EventIndex,
    latency: Duration,
}

impl DemoProvider {
    /// Creates a demo provider over the sample events.
    pub fn new() -> Self {
        Self::with_index(EventIndex::sample(), Duration::from_millis(250))
    }

    /// Creates a demo provider over a custom index and latency.
    pub fn with_index(index: EventIndex, latency: Duration) -> Self {
        Self { index, latency }
    }
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for DemoProvider {
    async fn search(&self, query: &str) -> Result<SearchOutcome, SearchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(self.index.search(query))
    }
}
