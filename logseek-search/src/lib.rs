//! Logseek Search - Event search wire types and providers

#![warn(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Defines the search service contract (request encoding, response shape),
//! the provider abstraction used by the session controller, and the in-memory
//! event index that backs both the demo provider and the search service.

pub mod encode;
pub mod errors;
pub mod index;
pub mod providers;
pub mod service;
pub mod types;

// Re-export main types
pub use encode::{encode_query, request_url};
pub use errors::SearchError;
pub use index::EventIndex;
pub use providers::{DemoProvider, HttpSearchProvider, SearchProvider};
#[cfg(any(test, feature = "test-utils"))]
pub use providers::{ScriptedProvider, ScriptedRequest};
pub use service::SearchService;
pub use types::{EventId, NanoTimestamp, SearchOutcome, SearchResult};

/// Convenience type alias for Results with SearchError.
pub type Result<T> = std::result::Result<T, SearchError>;
