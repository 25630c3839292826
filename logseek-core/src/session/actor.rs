//! Actor implementation for the search session controller.

use logseek_search::SearchService;
use tokio::sync::{mpsc, watch};

use super::commands::{Resolution, SessionCommand};
use super::handle::SearchSessionHandle;
use super::state::{Generation, ResolutionOutcome, SessionEvent, SessionSnapshot};
use crate::config::{ResolutionPolicy, SessionConfig};

/// Spawns the search session actor and returns its handle.
///
/// The actor is the only writer of the session snapshot. Request tasks run
/// concurrently and report back over a channel, so resolutions are applied
/// one at a time in arrival order.
///
/// # Examples
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() {
/// use logseek_core::config::SessionConfig;
/// use logseek_core::session::spawn_search_session;
/// use logseek_search::SearchService;
///
/// let handle = spawn_search_session(SessionConfig::default(), SearchService::new_demo());
/// handle.set_query("disk").await.unwrap();
/// handle.submit_search().await.unwrap();
/// # }
/// ```
pub fn spawn_search_session(config: SessionConfig, service: SearchService) -> SearchSessionHandle {
    let (sender, receiver) = mpsc::channel(config.command_buffer.max(1));
    let (resolution_sender, resolution_receiver) = mpsc::unbounded_channel();
    let (snapshot_sender, snapshot_receiver) = watch::channel(SessionSnapshot::default());

    let actor = SessionActor {
        policy: config.resolution_policy,
        service,
        snapshot: SessionSnapshot::default(),
        snapshots: snapshot_sender,
        resolutions: resolution_sender,
    };

    tokio::spawn(async move {
        run_actor_loop(actor, receiver, resolution_receiver).await;
    });

    SearchSessionHandle::new(sender, snapshot_receiver)
}

struct SessionActor {
    policy: ResolutionPolicy,
    service: SearchService,
    snapshot: SessionSnapshot,
    snapshots: watch::Sender<SessionSnapshot>,
    resolutions: mpsc::UnboundedSender<Resolution>,
}

/// Runs the main actor message processing loop.
///
/// Continues until every handle is dropped or a shutdown command arrives.
/// Requests still in flight at that point resolve into a closed channel.
async fn run_actor_loop(
    mut actor: SessionActor,
    mut receiver: mpsc::Receiver<SessionCommand>,
    mut resolutions: mpsc::UnboundedReceiver<Resolution>,
) {
    tracing::debug!(policy = %actor.policy, "Search session actor started");

    loop {
        tokio::select! {
            command = receiver.recv() => {
                let Some(command) = command else { break };
                if !actor.handle_command(command) {
                    break;
                }
            }
            Some(resolution) = resolutions.recv() => {
                actor.apply_resolution(resolution);
            }
        }
    }

    tracing::debug!("Search session actor stopped");
}

impl SessionActor {
    /// Handles a single command. Returns false to shut down.
    fn handle_command(&mut self, command: SessionCommand) -> bool {
        match command {
            SessionCommand::SetQuery { text, responder } => {
                self.update(|snapshot| snapshot.with_query(text));
                let _ = responder.send(());
            }
            SessionCommand::Submit { responder } => {
                let generation = self.submit();
                let _ = responder.send(generation);
            }
            SessionCommand::Shutdown { responder } => {
                let _ = responder.send(());
                return false;
            }
        }
        true
    }

    /// Publishes Pending, then issues the request on its own task.
    fn submit(&mut self) -> Generation {
        let mut generation = Generation::default();
        self.update(|snapshot| {
            let (next, issued) = snapshot.submitted();
            generation = issued;
            next
        });

        let query = self.snapshot.query.clone();
        tracing::debug!(%generation, query_len = query.len(), "Search submitted");

        let service = self.service.clone();
        let resolutions = self.resolutions.clone();
        tokio::spawn(async move {
            let result = service.search(&query).await;
            let _ = resolutions.send(Resolution { generation, result });
        });

        generation
    }

    fn apply_resolution(&mut self, resolution: Resolution) {
        let Resolution { generation, result } = resolution;

        match &result {
            Ok(outcome) => tracing::debug!(
                %generation,
                results = outcome.results.len(),
                count = outcome.count,
                "Search resolved"
            ),
            Err(error) => tracing::warn!(%generation, "Search failed: {}", error.failure_message()),
        }

        let policy = self.policy;
        let mut applied = ResolutionOutcome::Applied;
        self.update(|snapshot| {
            let (next, outcome) =
                snapshot.resolved(generation, SessionEvent::from_result(result), policy);
            applied = outcome;
            next
        });

        if applied == ResolutionOutcome::Discarded {
            tracing::debug!(
                %generation,
                latest = %self.snapshot.latest_generation,
                "Discarded stale search resolution"
            );
        }
    }

    /// Replaces the snapshot through a pure transition and publishes it.
    fn update(&mut self, change: impl FnOnce(SessionSnapshot) -> SessionSnapshot) {
        let current = std::mem::take(&mut self.snapshot);
        self.snapshot = change(current);
        self.snapshots.send_replace(self.snapshot.clone());
    }
}
