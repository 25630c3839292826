//! Integration tests for Logseek
//!
//! These tests run the real HTTP provider and search session against real
//! axum servers bound to ephemeral local ports.

#[path = "integration/support.rs"]
mod support;

#[path = "integration/http_provider.rs"]
mod http_provider;
#[path = "integration/session_flow.rs"]
mod session_flow;
