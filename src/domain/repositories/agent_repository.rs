use async_trait::async_trait;

use super::StoreError;
use crate::domain::agent::{Agent, AgentStatus};

/// Repository trait for the agents collection
///
/// Defines the contract for persisting and retrieving agents.
/// Implementations handle storage-specific details.
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Insert a freshly registered agent
    async fn insert(&self, agent: &Agent) -> Result<(), StoreError>;

    /// Find an agent by its store id
    async fn find_by_id(&self, id: &str) -> Result<Option<Agent>, StoreError>;

    /// List every agent
    async fn list(&self) -> Result<Vec<Agent>, StoreError>;

    /// Patch an agent's status together with its paired current-task value,
    /// refreshing `last_updated`. Fails with `AgentNotFound` for unknown ids.
    async fn update_status(
        &self,
        id: &str,
        status: AgentStatus,
        current_task: Option<String>,
    ) -> Result<(), StoreError>;
}
