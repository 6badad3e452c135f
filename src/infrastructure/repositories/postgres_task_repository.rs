use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::repositories::{StoreError, TaskRepository};
use crate::domain::task::{Task, TaskStatus};

/// PostgreSQL implementation of TaskRepository
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: String,
    agent_id: String,
    description: String,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task::from_persistence(
            row.id,
            row.agent_id,
            row.description,
            row.status,
            row.created_at,
            row.updated_at,
        )
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, agent_id, description, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(task.id())
        .bind(task.agent_id())
        .bind(task.description())
        .bind(task.status())
        .bind(task.created_at())
        .bind(task.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_agent(&self, agent_id: &str) -> Result<Vec<Task>, StoreError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, agent_id, description, status, created_at, updated_at
            FROM tasks
            WHERE agent_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(agent_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn update_status(&self, id: &str, status: TaskStatus) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET status = $2, updated_at = GREATEST(updated_at, now())
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::TaskNotFound(id.to_string()));
        }

        Ok(())
    }
}
