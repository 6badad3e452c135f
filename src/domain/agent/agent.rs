use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::value_objects::AgentStatus;

/// Agent aggregate root
///
/// Represents one tracked worker on the Mission Control dashboard.
///
/// # Invariants
/// - `status` and `current_task` are always written together as a pair:
///   working carries a task description, idle clears it, blocked carries
///   the blocking reason in the same field
/// - `last_updated` never decreases
///
/// Agents are created once via registration and mutated only through
/// status updates; nothing deletes them.
#[derive(Debug, Clone)]
pub struct Agent {
    id: String,
    name: String,
    role: String,
    avatar: String,
    status: AgentStatus,
    current_task: Option<String>,
    last_updated: DateTime<Utc>,
}

impl Agent {
    /// Registers a new agent, starting out idle with no current task
    ///
    /// # Business Rules Enforced
    /// - Name must not be empty
    /// - Role must not be empty
    pub fn register(name: String, role: String, avatar: String) -> Result<Self, String> {
        if name.is_empty() {
            return Err("Agent name cannot be empty".to_string());
        }
        if role.is_empty() {
            return Err("Agent role cannot be empty".to_string());
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            role,
            avatar,
            status: AgentStatus::Idle,
            current_task: None,
            last_updated: Utc::now(),
        })
    }

    /// Reconstructs an agent from stored state
    pub fn from_persistence(
        id: String,
        name: String,
        role: String,
        avatar: String,
        status: AgentStatus,
        current_task: Option<String>,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            role,
            avatar,
            status,
            current_task,
            last_updated,
        }
    }

    /// Writes a new status together with its paired current-task value
    ///
    /// There is no transition guard; the store's last-write-wins semantics
    /// apply. `last_updated` is clamped so it never moves backwards.
    pub fn set_status(&mut self, status: AgentStatus, current_task: Option<String>) {
        self.status = status;
        self.current_task = current_task;
        self.last_updated = Utc::now().max(self.last_updated);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    pub fn status(&self) -> AgentStatus {
        self.status
    }

    pub fn current_task(&self) -> Option<&str> {
        self.current_task.as_deref()
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }
}
