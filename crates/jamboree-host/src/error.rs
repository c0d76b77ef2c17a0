use thiserror::Error;

use crate::core::session::SessionPhase;

/// Failures surfaced across the host/minigame boundary.
///
/// There is no retry policy: a `ResourceUnavailable` during init aborts
/// the session, and an `InvalidState` means the host broke the lifecycle
/// contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// An asset or context could not be acquired. Fatal; propagated to
    /// the host unchanged.
    #[error("resource unavailable: {what}")]
    ResourceUnavailable { what: String },

    /// An entry point was invoked outside the legal lifecycle sequence.
    #[error("{entry} called while session is {phase:?}")]
    InvalidState {
        entry: &'static str,
        phase: SessionPhase,
    },
}

impl HostError {
    pub fn resource(what: impl Into<String>) -> Self {
        Self::ResourceUnavailable { what: what.into() }
    }
}
