//! Search session controller
//!
//! Owns the query text and the lifecycle of the most recent search attempt.
//! The controller runs as an actor: the handle sends commands, request tasks
//! report resolutions back, and the actor applies everything through the pure
//! state machine in [`state`] before publishing a new snapshot.

pub mod actor;
pub mod commands;
pub mod handle;
pub mod state;

pub use actor::spawn_search_session;
pub use handle::SearchSessionHandle;
pub use state::{
    Generation, ResolutionOutcome, SessionEvent, SessionPhase, SessionSnapshot, SessionState,
    transition,
};

/// Errors returned by session handle operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Search session has shut down")]
    SessionClosed,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use logseek_search::{
        EventId, NanoTimestamp, ScriptedProvider, ScriptedRequest, SearchError, SearchOutcome,
        SearchResult, SearchService,
    };
    use tokio::sync::mpsc;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::config::{ResolutionPolicy, SessionConfig};

    fn scripted_session(
        policy: ResolutionPolicy,
    ) -> (SearchSessionHandle, mpsc::UnboundedReceiver<ScriptedRequest>) {
        let (provider, requests) = ScriptedProvider::new();
        let config = SessionConfig {
            resolution_policy: policy,
            ..Default::default()
        };
        let handle =
            spawn_search_session(config, SearchService::with_provider(Arc::new(provider)));
        (handle, requests)
    }

    fn hello_outcome() -> SearchOutcome {
        SearchOutcome {
            results: vec![SearchResult {
                event_id: EventId::from("e1"),
                message: "hello".to_string(),
                timestamp: NanoTimestamp(123_456_789),
            }],
            count: 1,
            time_ms: 4.2,
        }
    }

    /// Receives `count` parked requests keyed by query; spawned request
    /// tasks may reach the provider in any order.
    async fn take_requests(
        requests: &mut mpsc::UnboundedReceiver<ScriptedRequest>,
        count: usize,
    ) -> HashMap<String, ScriptedRequest> {
        let mut parked = HashMap::new();
        for _ in 0..count {
            let request = requests.recv().await.unwrap();
            parked.insert(request.query.clone(), request);
        }
        parked
    }

    async fn wait_for_resolutions(handle: &SearchSessionHandle, count: u64) -> SessionSnapshot {
        let mut snapshots = handle.subscribe();
        let snapshot = snapshots
            .wait_for(|snapshot| snapshot.resolutions >= count)
            .await
            .unwrap();
        snapshot.clone()
    }

    #[tokio::test]
    async fn test_session_starts_idle() {
        let (handle, _requests) = scripted_session(ResolutionPolicy::LastArrival);
        let snapshot = handle.snapshot();

        assert_eq!(snapshot.state, SessionState::Idle);
        assert_eq!(snapshot.query, "");
        assert_eq!(snapshot.latest_generation, Generation(0));
    }

    #[tokio::test]
    async fn test_submit_is_pending_before_response() {
        let (handle, mut requests) = scripted_session(ResolutionPolicy::LastArrival);

        assert_ok!(handle.set_query("hello").await);
        let generation = assert_ok!(handle.submit_search().await);

        assert_eq!(generation, Generation(1));
        assert_eq!(handle.snapshot().state, SessionState::Pending);

        // The request reached the provider with the raw query text
        let request = requests.recv().await.unwrap();
        assert_eq!(request.query, "hello");
        assert_eq!(handle.snapshot().state, SessionState::Pending);

        request.succeed(hello_outcome());
        let snapshot = wait_for_resolutions(&handle, 1).await;
        assert_eq!(snapshot.state, SessionState::Success(hello_outcome()));
    }

    #[tokio::test]
    async fn test_submit_from_every_settled_state_goes_pending() {
        let (handle, mut requests) = scripted_session(ResolutionPolicy::LastArrival);

        // Idle -> Pending
        handle.submit_search().await.unwrap();
        assert!(handle.snapshot().state.is_pending());
        requests.recv().await.unwrap().succeed(hello_outcome());
        wait_for_resolutions(&handle, 1).await;

        // Success -> Pending, previous payload dropped
        handle.submit_search().await.unwrap();
        assert_eq!(handle.snapshot().state, SessionState::Pending);
        requests
            .recv()
            .await
            .unwrap()
            .fail(SearchError::transport("network down"));
        let snapshot = wait_for_resolutions(&handle, 2).await;
        assert_eq!(snapshot.state, SessionState::Failed("network down".to_string()));

        // Failed -> Pending, error cleared
        handle.submit_search().await.unwrap();
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.state, SessionState::Pending);
        assert_eq!(snapshot.state.error_message(), None);
    }

    #[tokio::test]
    async fn test_empty_query_is_forwarded() {
        let (handle, mut requests) = scripted_session(ResolutionPolicy::LastArrival);

        handle.submit_search().await.unwrap();
        assert_eq!(requests.recv().await.unwrap().query, "");
    }

    #[tokio::test]
    async fn test_rejected_request_clears_previous_success() {
        let (handle, mut requests) = scripted_session(ResolutionPolicy::LastArrival);

        handle.search("hello").await.unwrap();
        requests.recv().await.unwrap().succeed(hello_outcome());
        wait_for_resolutions(&handle, 1).await;

        handle.submit_search().await.unwrap();
        requests.recv().await.unwrap().fail(SearchError::RequestRejected);
        let snapshot = wait_for_resolutions(&handle, 2).await;

        assert_eq!(snapshot.state, SessionState::Failed("Search failed".to_string()));
        assert_eq!(snapshot.state.outcome(), None);
    }

    #[tokio::test]
    async fn test_last_arrival_wins_across_overlapping_submissions() {
        let (handle, mut requests) = scripted_session(ResolutionPolicy::LastArrival);

        assert_eq!(handle.search("first").await.unwrap(), Generation(1));
        assert_eq!(handle.search("second").await.unwrap(), Generation(2));
        let mut parked = take_requests(&mut requests, 2).await;
        let first = parked.remove("first").unwrap();
        let second = parked.remove("second").unwrap();

        second.succeed(hello_outcome());
        let snapshot = wait_for_resolutions(&handle, 1).await;
        assert_eq!(snapshot.state.phase(), SessionPhase::Success);

        first.fail(SearchError::RequestRejected);
        let snapshot = wait_for_resolutions(&handle, 2).await;
        assert_eq!(snapshot.state, SessionState::Failed("Search failed".to_string()));
    }

    #[tokio::test]
    async fn test_latest_submission_policy_discards_stale_result() {
        let (handle, mut requests) = scripted_session(ResolutionPolicy::LatestSubmission);

        handle.search("first").await.unwrap();
        handle.search("second").await.unwrap();
        let mut parked = take_requests(&mut requests, 2).await;
        let first = parked.remove("first").unwrap();
        let second = parked.remove("second").unwrap();

        second.succeed(hello_outcome());
        first.fail(SearchError::RequestRejected);

        let snapshot = wait_for_resolutions(&handle, 2).await;
        assert_eq!(snapshot.state, SessionState::Success(hello_outcome()));
    }

    #[tokio::test]
    async fn test_set_query_never_changes_phase() {
        let (handle, mut requests) = scripted_session(ResolutionPolicy::LastArrival);

        handle.set_query("a").await.unwrap();
        assert_eq!(handle.snapshot().state.phase(), SessionPhase::Idle);

        handle.submit_search().await.unwrap();
        handle.set_query("ab").await.unwrap();
        assert_eq!(handle.snapshot().state.phase(), SessionPhase::Pending);
        assert_eq!(handle.snapshot().query, "ab");

        requests.recv().await.unwrap().succeed(hello_outcome());
        wait_for_resolutions(&handle, 1).await;
        handle.set_query("abc").await.unwrap();
        assert_eq!(handle.snapshot().state.phase(), SessionPhase::Success);
    }

    #[tokio::test]
    async fn test_query_is_captured_at_submit_time() {
        let (handle, mut requests) = scripted_session(ResolutionPolicy::LastArrival);

        handle.search("before").await.unwrap();
        handle.set_query("after").await.unwrap();

        assert_eq!(requests.recv().await.unwrap().query, "before");
    }

    #[tokio::test]
    async fn test_settled_waits_for_all_requests() {
        let (handle, mut requests) = scripted_session(ResolutionPolicy::LastArrival);

        handle.search("one").await.unwrap();
        handle.search("two").await.unwrap();

        let waiter = tokio::spawn({
            let handle = handle.clone();
            async move { handle.settled().await }
        });

        requests.recv().await.unwrap().succeed(SearchOutcome::empty());
        requests.recv().await.unwrap().succeed(hello_outcome());

        let snapshot = waiter.await.unwrap().unwrap();
        assert_eq!(snapshot.resolutions, 2);
        assert!(snapshot.is_settled());
    }

    #[tokio::test]
    async fn test_operations_fail_after_shutdown() {
        let (handle, _requests) = scripted_session(ResolutionPolicy::LastArrival);

        assert_ok!(handle.shutdown().await);
        assert_eq!(
            assert_err!(handle.submit_search().await),
            SessionError::SessionClosed
        );
        assert_err!(handle.set_query("late").await);
    }
}
