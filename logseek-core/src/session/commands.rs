//! Command definitions for the search session actor.

use logseek_search::{SearchError, SearchOutcome};
use tokio::sync::oneshot;

use super::state::Generation;

/// Commands that can be sent to the session actor.
///
/// Each command carries a response channel; the actor answers after the
/// corresponding snapshot has been published.
#[derive(Debug)]
pub enum SessionCommand {
    /// Replace the query text.
    SetQuery {
        text: String,
        responder: oneshot::Sender<()>,
    },
    /// Move to Pending and issue a request for the current query.
    Submit {
        responder: oneshot::Sender<Generation>,
    },
    /// Stop the actor.
    Shutdown { responder: oneshot::Sender<()> },
}

/// Result of one request task, reported back to the actor.
#[derive(Debug)]
pub struct Resolution {
    pub generation: Generation,
    pub result: Result<SearchOutcome, SearchError>,
}
