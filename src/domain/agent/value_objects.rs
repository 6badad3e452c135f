use serde::{Deserialize, Serialize};

/// Display status of a tracked agent
///
/// There are no guarded transitions: any status may be written over any
/// other. A spawn for an already-working agent simply replaces the task,
/// and repeating a completion writes the same idle state again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "agent_status", rename_all = "lowercase")]
pub enum AgentStatus {
    /// Resting state; also the initial state after registration
    Idle,
    /// Actively executing a task; always paired with a task description
    Working,
    /// Unable to proceed; the reason occupies the current-task slot
    Blocked,
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentStatus::Idle => write!(f, "idle"),
            AgentStatus::Working => write!(f, "working"),
            AgentStatus::Blocked => write!(f, "blocked"),
        }
    }
}
