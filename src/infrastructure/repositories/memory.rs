use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::agent::{Agent, AgentStatus};
use crate::domain::repositories::{AgentRepository, StoreError, TaskRepository};
use crate::domain::task::{Task, TaskStatus};

/// In-memory implementation of AgentRepository
///
/// Backs the integration tests. Mirrors the Postgres implementation's
/// observable behavior, including the missing foreign-key check on task
/// inserts.
#[derive(Default)]
pub struct InMemoryAgentRepository {
    agents: RwLock<HashMap<String, Agent>>,
}

impl InMemoryAgentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AgentRepository for InMemoryAgentRepository {
    async fn insert(&self, agent: &Agent) -> Result<(), StoreError> {
        let mut agents = self.agents.write().expect("agents lock poisoned");
        agents.insert(agent.id().to_string(), agent.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Agent>, StoreError> {
        let agents = self.agents.read().expect("agents lock poisoned");
        Ok(agents.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Agent>, StoreError> {
        let agents = self.agents.read().expect("agents lock poisoned");
        let mut all: Vec<Agent> = agents.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(all)
    }

    async fn update_status(
        &self,
        id: &str,
        status: AgentStatus,
        current_task: Option<String>,
    ) -> Result<(), StoreError> {
        let mut agents = self.agents.write().expect("agents lock poisoned");
        let agent = agents
            .get_mut(id)
            .ok_or_else(|| StoreError::AgentNotFound(id.to_string()))?;
        agent.set_status(status, current_task);
        Ok(())
    }
}

/// In-memory implementation of TaskRepository
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<HashMap<String, Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> Result<(), StoreError> {
        let mut tasks = self.tasks.write().expect("tasks lock poisoned");
        tasks.insert(task.id().to_string(), task.clone());
        Ok(())
    }

    async fn find_by_agent(&self, agent_id: &str) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.read().expect("tasks lock poisoned");
        let mut owned: Vec<Task> = tasks
            .values()
            .filter(|t| t.agent_id() == agent_id)
            .cloned()
            .collect();
        owned.sort_by_key(|t| t.created_at());
        Ok(owned)
    }

    async fn update_status(&self, id: &str, status: TaskStatus) -> Result<(), StoreError> {
        let mut tasks = self.tasks.write().expect("tasks lock poisoned");
        let task = tasks
            .get_mut(id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))?;
        task.set_status(status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn update_status_on_unknown_agent_fails() {
        let repo = InMemoryAgentRepository::new();
        let result = repo
            .update_status("missing", AgentStatus::Working, Some("task".to_string()))
            .await;
        assert!(matches!(result, Err(StoreError::AgentNotFound(_))));
    }

    #[tokio::test]
    async fn insert_and_list_agents_sorted_by_name() {
        let repo = InMemoryAgentRepository::new();
        let beta =
            Agent::register("Beta".to_string(), "Tester".to_string(), "🧪".to_string()).unwrap();
        let alpha =
            Agent::register("Alpha".to_string(), "Coder".to_string(), "💻".to_string()).unwrap();
        repo.insert(&beta).await.unwrap();
        repo.insert(&alpha).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name(), "Alpha");
        assert_eq!(all[1].name(), "Beta");
    }

    #[tokio::test]
    async fn task_insert_does_not_require_agent_row() {
        let repo = InMemoryTaskRepository::new();
        let task = Task::create("no-such-agent".to_string(), "orphan".to_string()).unwrap();
        repo.insert(&task).await.unwrap();

        let owned = repo.find_by_agent("no-such-agent").await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].description(), "orphan");
    }
}
