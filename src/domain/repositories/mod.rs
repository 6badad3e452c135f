// Repository trait exports

pub mod agent_repository;
pub mod task_repository;

pub use agent_repository::AgentRepository;
pub use task_repository::TaskRepository;

use thiserror::Error;

/// Errors surfaced by the status store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
