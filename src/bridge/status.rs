use std::sync::Arc;

use serde_json::{json, Value};
use tracing::info;

use super::error::BridgeError;
use super::transport::RelayTransport;
use crate::domain::agent::AgentStatus;

/// Status-update helpers: one relay call per semantic transition
///
/// All helpers fail loud; any transport failure propagates to the
/// immediate caller as a `BridgeError`.
#[derive(Clone)]
pub struct StatusClient {
    transport: Arc<dyn RelayTransport>,
}

impl StatusClient {
    pub fn new(transport: Arc<dyn RelayTransport>) -> Self {
        Self { transport }
    }

    /// Updates an agent's status together with its current-task value
    pub async fn update_status(
        &self,
        agent_id: &str,
        status: AgentStatus,
        current_task: Option<&str>,
    ) -> Result<(), BridgeError> {
        let args = json!({
            "agentId": agent_id,
            "status": status,
            "currentTask": current_task,
        });

        self.transport
            .send("updateAgentStatus", args)
            .await
            .map_err(|e| BridgeError::StatusUpdate(e.to_string()))?;

        info!(agent_id, status = %status, task = ?current_task, "updated agent status");
        Ok(())
    }

    /// Creates a task record for an agent, returning the new task id
    pub async fn create_task(
        &self,
        agent_id: &str,
        description: &str,
    ) -> Result<String, BridgeError> {
        let reply = self
            .transport
            .send(
                "createTask",
                json!({ "agentId": agent_id, "description": description }),
            )
            .await
            .map_err(|e| BridgeError::TaskCreation(e.to_string()))?;

        let task_id = match reply {
            Value::String(id) => id,
            other => other.to_string(),
        };

        info!(agent_id, description, task_id = %task_id, "created task");
        Ok(task_id)
    }

    /// Marks an agent idle, clearing any displayed task
    pub async fn mark_idle(&self, agent_id: &str) -> Result<(), BridgeError> {
        self.update_status(agent_id, AgentStatus::Idle, None).await?;
        info!(agent_id, "marked agent as idle");
        Ok(())
    }

    /// Marks an agent as working and records the task
    ///
    /// Two independent requests, not a transaction: if task creation
    /// fails after the status update succeeded, the agent is left working
    /// with no task record.
    pub async fn mark_working(&self, agent_id: &str, description: &str) -> Result<(), BridgeError> {
        self.update_status(agent_id, AgentStatus::Working, Some(description))
            .await?;
        self.create_task(agent_id, description).await?;
        info!(agent_id, task = description, "marked agent as working");
        Ok(())
    }

    /// Marks an agent blocked; the reason lands in the current-task slot
    pub async fn mark_blocked(&self, agent_id: &str, reason: &str) -> Result<(), BridgeError> {
        self.update_status(agent_id, AgentStatus::Blocked, Some(reason))
            .await?;
        info!(agent_id, reason, "marked agent as blocked");
        Ok(())
    }
}
