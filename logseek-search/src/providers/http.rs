//! HTTP provider talking to the remote search service.

use std::time::Duration;

use async_trait::async_trait;

use super::SearchProvider;
use crate::encode::request_url;
use crate::errors::SearchError;
use crate::types::SearchOutcome;

/// Search provider issuing `GET {endpoint}?{param}={query}` requests.
///
/// Any non-2xx status is a rejection; network failures, timeouts and bodies
/// that do not decode as a search outcome are transport failures.
#[derive(Debug, Clone)]
pub struct HttpSearchProvider {
    client: reqwest::Client,
    endpoint: String,
    query_param: String,
}

impl HttpSearchProvider {
    /// Default search service endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:8080/search";

    /// Default name of the query parameter.
    pub const DEFAULT_QUERY_PARAM: &'static str = "q";

    /// Create provider for the default local endpoint.
    pub fn new() -> Self {
        Self::with_client(
            reqwest::Client::new(),
            Self::DEFAULT_ENDPOINT,
            Self::DEFAULT_QUERY_PARAM,
        )
    }

    /// Create provider with custom configuration.
    ///
    /// # Errors
    /// - `SearchError::Transport` - HTTP client could not be constructed
    pub fn with_config(
        endpoint: &str,
        query_param: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self::with_client(client, endpoint, query_param))
    }

    /// Create provider around an existing client.
    pub fn with_client(client: reqwest::Client, endpoint: &str, query_param: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            query_param: query_param.to_string(),
        }
    }

    /// Endpoint this provider sends requests to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request URL for the given query text.
    pub fn url_for(&self, query: &str) -> String {
        request_url(&self.endpoint, &self.query_param, query)
    }
}

impl Default for HttpSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    async fn search(&self, query: &str) -> Result<SearchOutcome, SearchError> {
        let url = self.url_for(query);
        tracing::trace!(%url, "Sending search request");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            tracing::debug!("Search service rejected request");
            return Err(SearchError::RequestRejected);
        }

        let body = response.bytes().await?;
        let outcome: SearchOutcome = serde_json::from_slice(&body)?;

        tracing::trace!(
            results = outcome.results.len(),
            count = outcome.count,
            time_ms = outcome.time_ms,
            "Decoded search response"
        );

        Ok(outcome)
    }
}
