use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::value_objects::TaskStatus;

/// Task record tied to an agent
///
/// `agent_id` is a reference, not ownership: the store does not enforce
/// that the agent row exists, matching the original dashboard store.
#[derive(Debug, Clone)]
pub struct Task {
    id: String,
    agent_id: String,
    description: String,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task for an agent
    ///
    /// # Business Rules Enforced
    /// - Description must not be empty
    pub fn create(agent_id: String, description: String) -> Result<Self, String> {
        if description.is_empty() {
            return Err("Task description cannot be empty".to_string());
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            agent_id,
            description,
            status: TaskStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstructs a task from stored state
    pub fn from_persistence(
        id: String,
        agent_id: String,
        description: String,
        status: TaskStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            agent_id,
            description,
            status,
            created_at,
            updated_at,
        }
    }

    /// Moves the task to a new status, touching `updated_at`
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        self.updated_at = Utc::now().max(self.updated_at);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
