use std::sync::Arc;

use crate::domain::repositories::{AgentRepository, TaskRepository};

/// Shared handler state: the injected status store
///
/// Repositories are trait objects so the relay runs against Postgres in
/// production and the in-memory store in tests.
#[derive(Clone)]
pub struct AppState {
    pub agents: Arc<dyn AgentRepository>,
    pub tasks: Arc<dyn TaskRepository>,
}

impl AppState {
    pub fn new(agents: Arc<dyn AgentRepository>, tasks: Arc<dyn TaskRepository>) -> Self {
        Self { agents, tasks }
    }
}
