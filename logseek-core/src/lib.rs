//! Logseek Core - Search session controller and page model
//!
//! This crate owns the client side of the log search page: the session that
//! tracks query text and the most recent search attempt, the view derived from
//! it, and the configuration, runtime mode and tracing setup shared by the
//! binaries.

pub mod components;
pub mod config;
pub mod mode;
pub mod session;
pub mod tracing_setup;
pub mod view;

// Re-export main types for convenient access
pub use components::{build_search_service, start_session};
pub use config::{LogseekConfig, ResolutionPolicy};
pub use logseek_search::SearchError;
pub use mode::RuntimeMode;
pub use session::{SearchSessionHandle, SessionError, SessionSnapshot, SessionState};
pub use view::{ResultBlock, View, render};

/// Core errors that can bubble up from any Logseek subsystem.
#[derive(Debug, thiserror::Error)]
pub enum LogseekError {
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogseekError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            LogseekError::Search(e) => e.failure_message(),
            LogseekError::Session(_) => "Search session stopped unexpectedly".to_string(),
            LogseekError::Configuration { reason } => format!("Invalid configuration: {reason}"),
            LogseekError::Io(_) => "File system error occurred".to_string(),
        }
    }

    /// Checks if this error is due to user input validation.
    pub fn is_user_error(&self) -> bool {
        matches!(self, LogseekError::Configuration { .. })
    }
}

pub type Result<T> = std::result::Result<T, LogseekError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            LogseekError::from(SearchError::RequestRejected).user_message(),
            "Search failed"
        );
        assert_eq!(
            LogseekError::from(SearchError::transport("")).user_message(),
            "Unknown error"
        );
        assert_eq!(
            LogseekError::Configuration {
                reason: "bad port".to_string()
            }
            .user_message(),
            "Invalid configuration: bad port"
        );
        assert!(!LogseekError::from(SessionError::SessionClosed).is_user_error());
    }
}
