use thiserror::Error;

/// Helper-tier errors
///
/// Raised on any non-success transport response and always propagated to
/// the immediate caller. The lifecycle handlers above decide what to
/// swallow.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Failed to update agent status: {0}")]
    StatusUpdate(String),

    #[error("Failed to create task: {0}")]
    TaskCreation(String),

    #[error("Failed to register agent: {0}")]
    Registration(String),
}

/// Bridge-tier error: a tracking call that failed
///
/// Handed back as a side channel from the lifecycle handlers so callers
/// and tests can observe it. It never aborts the agent's real work; the
/// listener and middleware layers discard it.
#[derive(Debug, Error)]
#[error("Status tracking failed for agent {agent_id}: {source}")]
pub struct TrackingError {
    pub agent_id: String,
    #[source]
    pub source: BridgeError,
}
