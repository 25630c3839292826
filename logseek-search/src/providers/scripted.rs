//! Scripted provider for tests that need to control resolution order.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use super::SearchProvider;
use crate::errors::SearchError;
use crate::types::SearchOutcome;

/// Provider whose calls park until the test answers them.
///
/// Every `search` call is forwarded as a [`ScriptedRequest`] on the receiver
/// returned by [`ScriptedProvider::new`], in invocation order. The call
/// resolves when the test answers that request, so tests decide the arrival
/// order of overlapping responses.
#[derive(Debug, Clone)]
pub struct ScriptedProvider {
    requests: mpsc::UnboundedSender<ScriptedRequest>,
}

/// One parked search call.
#[derive(Debug)]
pub struct ScriptedRequest {
    /// Raw query text the provider was called with
    pub query: String,
    responder: oneshot::Sender<Result<SearchOutcome, SearchError>>,
}

impl ScriptedProvider {
    /// Creates the provider and the receiver of its parked calls.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ScriptedRequest>) {
        let (requests, receiver) = mpsc::unbounded_channel();
        (Self { requests }, receiver)
    }
}

impl ScriptedRequest {
    /// Resolves the call with the given result.
    pub fn respond(self, result: Result<SearchOutcome, SearchError>) {
        let _ = self.responder.send(result);
    }

    /// Resolves the call successfully.
    pub fn succeed(self, outcome: SearchOutcome) {
        self.respond(Ok(outcome));
    }

    /// Resolves the call with a failure.
    pub fn fail(self, error: SearchError) {
        self.respond(Err(error));
    }
}

#[async_trait]
impl SearchProvider for ScriptedProvider {
    async fn search(&self, query: &str) -> Result<SearchOutcome, SearchError> {
        let (responder, response) = oneshot::channel();
        let request = ScriptedRequest {
            query: query.to_string(),
            responder,
        };

        self.requests
            .send(request)
            .map_err(|_| SearchError::transport("scripted provider closed"))?;

        response
            .await
            .map_err(|_| SearchError::transport("scripted request dropped"))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_requests_resolve_in_chosen_order() {
        let (provider, mut requests) = ScriptedProvider::new();

        let first = tokio::spawn({
            let provider = provider.clone();
            async move { provider.search("first").await }
        });
        let first_request = requests.recv().await.unwrap();

        let second = tokio::spawn({
            let provider = provider.clone();
            async move { provider.search("second").await }
        });
        let second_request = requests.recv().await.unwrap();

        assert_eq!(first_request.query, "first");
        assert_eq!(second_request.query, "second");

        second_request.succeed(SearchOutcome::empty());
        assert_eq!(second.await.unwrap(), Ok(SearchOutcome::empty()));

        first_request.fail(SearchError::RequestRejected);
        assert_eq!(first.await.unwrap(), Err(SearchError::RequestRejected));
    }

    #[tokio::test]
    async fn test_dropped_request_is_transport_failure() {
        let (provider, mut requests) = ScriptedProvider::new();
        let call = tokio::spawn(async move { provider.search("q").await });

        drop(requests.recv().await.unwrap());

        let error = call.await.unwrap().unwrap_err();
        assert_eq!(error.failure_message(), "scripted request dropped");
    }
}
