use async_trait::async_trait;

use super::StoreError;
use crate::domain::task::{Task, TaskStatus};

/// Repository trait for the tasks collection
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task. The owning agent is not verified to exist.
    async fn insert(&self, task: &Task) -> Result<(), StoreError>;

    /// Find every task belonging to an agent
    async fn find_by_agent(&self, agent_id: &str) -> Result<Vec<Task>, StoreError>;

    /// Move a task to a new status, touching `updated_at`.
    /// Fails with `TaskNotFound` for unknown ids.
    async fn update_status(&self, id: &str, status: TaskStatus) -> Result<(), StoreError>;
}
