//! Error types for event search requests.

use thiserror::Error;

/// Message shown when the service answers with a non-success status.
pub const REQUEST_REJECTED_MESSAGE: &str = "Search failed";

/// Message shown when a transport failure carries no description.
pub const UNKNOWN_FAILURE_MESSAGE: &str = "Unknown error";

/// Errors that can occur while running one search request.
///
/// Both variants end the current attempt only; the session stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Service responded with a non-success status.
    ///
    /// The status code is intentionally not carried: it is neither shown
    /// nor logged.
    #[error("Search failed")]
    RequestRejected,

    /// Request could not complete or the response body could not be decoded.
    #[error("{reason}")]
    Transport {
        /// Description of the underlying failure
        reason: String,
    },
}

impl SearchError {
    /// Creates a transport failure from any displayable error.
    pub fn transport(reason: impl std::fmt::Display) -> Self {
        Self::Transport {
            reason: reason.to_string(),
        }
    }

    /// Returns the text surfaced to the user for this failure.
    pub fn failure_message(&self) -> String {
        match self {
            SearchError::RequestRejected => REQUEST_REJECTED_MESSAGE.to_string(),
            SearchError::Transport { reason } if reason.trim().is_empty() => {
                UNKNOWN_FAILURE_MESSAGE.to_string()
            }
            SearchError::Transport { reason } => reason.clone(),
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(error: reqwest::Error) -> Self {
        Self::transport(error)
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(error: serde_json::Error) -> Self {
        Self::transport(error)
    }
}
