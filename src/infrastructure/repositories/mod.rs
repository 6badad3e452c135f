// Repository implementations

pub mod memory;
pub mod postgres_agent_repository;
pub mod postgres_task_repository;

pub use memory::{InMemoryAgentRepository, InMemoryTaskRepository};
pub use postgres_agent_repository::PostgresAgentRepository;
pub use postgres_task_repository::PostgresTaskRepository;
