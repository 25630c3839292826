//! Handle for communicating with the search session actor.

use tokio::sync::{mpsc, oneshot, watch};

use super::SessionError;
use super::commands::SessionCommand;
use super::state::{Generation, SessionSnapshot};
use crate::view::{View, render};

/// Handle for communicating with the search session actor.
///
/// Provides the controller operations as an async API. It can be cloned and
/// shared across tasks; all clones drive the same session.
#[derive(Clone)]
pub struct SearchSessionHandle {
    sender: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl SearchSessionHandle {
    /// Creates a new handle with the given command sender and snapshot feed.
    pub fn new(
        sender: mpsc::Sender<SessionCommand>,
        snapshots: watch::Receiver<SessionSnapshot>,
    ) -> Self {
        Self { sender, snapshots }
    }

    /// Replaces the query text.
    ///
    /// Returns once the new query is visible in [`snapshot`](Self::snapshot).
    /// Never changes the lifecycle phase.
    ///
    /// # Errors
    /// - `SessionError::SessionClosed` - Session actor has shut down
    pub async fn set_query(&self, text: impl Into<String>) -> Result<(), SessionError> {
        let (responder, rx) = oneshot::channel();
        let cmd = SessionCommand::SetQuery {
            text: text.into(),
            responder,
        };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| SessionError::SessionClosed)?;

        rx.await.map_err(|_| SessionError::SessionClosed)
    }

    /// Submits a search for the current query text.
    ///
    /// Returns once Pending has been published and the request has been
    /// issued; the response is applied later by the actor. Overlapping
    /// submissions are neither queued nor de-duplicated.
    ///
    /// # Errors
    /// - `SessionError::SessionClosed` - Session actor has shut down
    pub async fn submit_search(&self) -> Result<Generation, SessionError> {
        let (responder, rx) = oneshot::channel();
        let cmd = SessionCommand::Submit { responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| SessionError::SessionClosed)?;

        rx.await.map_err(|_| SessionError::SessionClosed)
    }

    /// Sets the query and submits it.
    ///
    /// # Errors
    /// - `SessionError::SessionClosed` - Session actor has shut down
    pub async fn search(&self, text: impl Into<String>) -> Result<Generation, SessionError> {
        self.set_query(text).await?;
        self.submit_search().await
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// View derived from the latest snapshot.
    pub fn render(&self) -> View {
        render(&self.snapshots.borrow())
    }

    /// Receiver notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Waits until every submitted request has resolved.
    ///
    /// # Errors
    /// - `SessionError::SessionClosed` - Session actor stopped before settling
    pub async fn settled(&self) -> Result<SessionSnapshot, SessionError> {
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots
            .wait_for(SessionSnapshot::is_settled)
            .await
            .map_err(|_| SessionError::SessionClosed)?;
        Ok(snapshot.clone())
    }

    /// Stops the session actor.
    ///
    /// # Errors
    /// - `SessionError::SessionClosed` - Session actor had already shut down
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        let (responder, rx) = oneshot::channel();

        self.sender
            .send(SessionCommand::Shutdown { responder })
            .await
            .map_err(|_| SessionError::SessionClosed)?;

        rx.await.map_err(|_| SessionError::SessionClosed)
    }
}
