//! Search session driving the real search service end to end.

use std::fs;

use logseek_core::config::LogseekConfig;
use logseek_core::session::{SessionPhase, SessionState};
use logseek_core::view::ResultBlock;
use logseek_core::{RuntimeMode, SearchSessionHandle, start_session};
use logseek_search::EventIndex;
use tempfile::TempDir;
use tokio::net::TcpListener;

use crate::support::{record, spawn_router, stub_router};

const EVENTS: &str = r#"{"EventId":"evt-1","Message":"disk full on node-1","NanoTimeStamp":"1000"}
{"EventId":"evt-2","Message":"user alice logged in","NanoTimeStamp":"2000"}
{"EventId":"evt-3","Message":"disk full on node-2","NanoTimeStamp":"3000"}
"#;

async fn spawn_service(index: EventIndex) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(logseek_web::serve(listener, index));
    format!("http://{addr}/search")
}

fn session_for(endpoint: String) -> SearchSessionHandle {
    let mut config = LogseekConfig::for_testing();
    config.service.endpoint = endpoint;
    start_session(&config, RuntimeMode::Production).unwrap()
}

#[tokio::test]
async fn test_search_against_loaded_event_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("events.jsonl"), EVENTS).unwrap();
    let index = logseek_web::load_event_dir(dir.path()).await.unwrap();

    let handle = session_for(spawn_service(index).await);
    handle.search("Disk FULL").await.unwrap();
    let snapshot = handle.settled().await.unwrap();

    let outcome = snapshot.state.outcome().unwrap();
    assert_eq!(outcome.count, 2);
    let ids: Vec<String> = outcome
        .results
        .iter()
        .map(|r| r.event_id.to_string())
        .collect();
    assert_eq!(ids, vec!["evt-3", "evt-1"]);

    let text = handle.render().to_string();
    assert!(text.contains("Found 2 results in"));
    assert!(text.contains("Event ID: evt-3"));
    assert!(text.contains("Message: disk full on node-2"));
}

#[tokio::test]
async fn test_empty_query_fails_with_generic_message() {
    let index = EventIndex::from_records([record("a", "anything", 1)]);
    let handle = session_for(spawn_service(index).await);

    // The service answers 400 for an empty query
    handle.submit_search().await.unwrap();
    let snapshot = handle.settled().await.unwrap();

    assert_eq!(snapshot.state, SessionState::Failed("Search failed".to_string()));
    assert_eq!(
        handle.render().block,
        ResultBlock::Error {
            message: "Search failed".to_string()
        }
    );
}

#[tokio::test]
async fn test_no_matches_renders_no_block() {
    let index = EventIndex::from_records([record("a", "anything", 1)]);
    let handle = session_for(spawn_service(index).await);

    handle.search("nothing-here").await.unwrap();
    let snapshot = handle.settled().await.unwrap();

    assert_eq!(snapshot.state.phase(), SessionPhase::Success);
    assert_eq!(handle.render().block, ResultBlock::Empty);
}

#[tokio::test]
async fn test_server_error_clears_previous_success() {
    let base = spawn_router(stub_router()).await;
    let handle = session_for(format!("{base}/flaky"));

    handle.search("hello").await.unwrap();
    assert_eq!(
        handle.settled().await.unwrap().state.phase(),
        SessionPhase::Success
    );

    handle.search("fail").await.unwrap();
    let snapshot = handle.settled().await.unwrap();
    assert_eq!(snapshot.state, SessionState::Failed("Search failed".to_string()));
    assert_eq!(snapshot.state.outcome(), None);
}

#[tokio::test]
async fn test_unreachable_service_reports_transport_error() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let handle = session_for(format!("http://{addr}/search"));
    handle.search("disk").await.unwrap();
    let snapshot = handle.settled().await.unwrap();

    let message = snapshot.state.error_message().unwrap();
    assert!(!message.is_empty());
    assert_ne!(message, "Search failed");
}
