//! Session state machine.
//!
//! The state is an immutable snapshot value; every change goes through the
//! pure functions in this module so the lifecycle can be tested without any
//! network or rendering layer.

use std::fmt;

use logseek_search::{SearchError, SearchOutcome};

use crate::config::ResolutionPolicy;

/// Sequence number of a submission. The first submission is generation 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

impl Generation {
    /// Generation following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle phase of the most recent search attempt, with its payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// No search submitted yet
    #[default]
    Idle,
    /// Request in flight
    Pending,
    /// Last applied resolution was a decoded response
    Success(SearchOutcome),
    /// Last applied resolution was a failure, with the user-facing message
    Failed(String),
}

/// Payload-free view of [`SessionState`], handy for comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Pending,
    Success,
    Failed,
}

impl SessionState {
    /// Phase of this state without its payload.
    pub fn phase(&self) -> SessionPhase {
        match self {
            SessionState::Idle => SessionPhase::Idle,
            SessionState::Pending => SessionPhase::Pending,
            SessionState::Success(_) => SessionPhase::Success,
            SessionState::Failed(_) => SessionPhase::Failed,
        }
    }

    /// Check whether a request is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, SessionState::Pending)
    }

    /// Outcome of the last successful search, if that is the current phase.
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        match self {
            SessionState::Success(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Failure message, if the current phase is Failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            SessionState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// External events driving the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// User triggered a search
    Submitted,
    /// A request resolved with a decoded response
    Succeeded(SearchOutcome),
    /// A request was rejected or failed in transport
    Failed(String),
}

impl SessionEvent {
    /// Converts a provider result into the matching resolution event.
    pub fn from_result(result: Result<SearchOutcome, SearchError>) -> Self {
        match result {
            Ok(outcome) => SessionEvent::Succeeded(outcome),
            Err(error) => SessionEvent::Failed(error.failure_message()),
        }
    }
}

/// Pure state transition.
///
/// Submitting always moves to Pending and drops any previous payload. A
/// resolution replaces whatever phase is current: with overlapping requests a
/// late resolution may land on Success or Failed and still wins. A resolution
/// while Idle has no submission behind it and is ignored.
pub fn transition(state: SessionState, event: SessionEvent) -> SessionState {
    match (state, event) {
        (_, SessionEvent::Submitted) => SessionState::Pending,
        (SessionState::Idle, _) => SessionState::Idle,
        (_, SessionEvent::Succeeded(outcome)) => SessionState::Success(outcome),
        (_, SessionEvent::Failed(message)) => SessionState::Failed(message),
    }
}

/// What happened to a resolution offered to a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Applied,
    /// Dropped because a newer submission exists (latest-submission policy)
    Discarded,
}

/// Immutable snapshot of a search session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionSnapshot {
    /// Current query text as typed
    pub query: String,
    /// Lifecycle state of the most recent search attempt
    pub state: SessionState,
    /// Generation of the most recent submission, `Generation(0)` before any
    pub latest_generation: Generation,
    /// Number of resolutions received, applied or discarded
    pub resolutions: u64,
}

impl SessionSnapshot {
    /// Replaces the query text. Never touches the lifecycle state.
    pub fn with_query(self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..self
        }
    }

    /// Records a submission and moves to Pending.
    pub fn submitted(self) -> (Self, Generation) {
        let generation = self.latest_generation.next();
        let snapshot = Self {
            state: transition(self.state, SessionEvent::Submitted),
            latest_generation: generation,
            ..self
        };
        (snapshot, generation)
    }

    /// Offers the resolution of `generation` to the snapshot.
    pub fn resolved(
        self,
        generation: Generation,
        event: SessionEvent,
        policy: ResolutionPolicy,
    ) -> (Self, ResolutionOutcome) {
        let resolutions = self.resolutions + 1;

        if policy == ResolutionPolicy::LatestSubmission && generation != self.latest_generation {
            return (
                Self {
                    resolutions,
                    ..self
                },
                ResolutionOutcome::Discarded,
            );
        }

        let snapshot = Self {
            state: transition(self.state, event),
            resolutions,
            ..self
        };
        (snapshot, ResolutionOutcome::Applied)
    }

    /// Check whether every submitted request has resolved.
    pub fn is_settled(&self) -> bool {
        self.resolutions >= self.latest_generation.0
    }
}
