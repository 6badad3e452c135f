use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::agent::{Agent, AgentStatus};
use crate::domain::repositories::{AgentRepository, StoreError};

/// PostgreSQL implementation of AgentRepository
///
/// Uses runtime-checked queries so the crate builds without a live
/// database connection.
pub struct PostgresAgentRepository {
    pool: PgPool,
}

impl PostgresAgentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AgentRow {
    id: String,
    name: String,
    role: String,
    avatar: String,
    status: AgentStatus,
    current_task: Option<String>,
    last_updated: DateTime<Utc>,
}

impl From<AgentRow> for Agent {
    fn from(row: AgentRow) -> Self {
        Agent::from_persistence(
            row.id,
            row.name,
            row.role,
            row.avatar,
            row.status,
            row.current_task,
            row.last_updated,
        )
    }
}

#[async_trait]
impl AgentRepository for PostgresAgentRepository {
    async fn insert(&self, agent: &Agent) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO agents (id, name, "role", avatar, status, current_task, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(agent.id())
        .bind(agent.name())
        .bind(agent.role())
        .bind(agent.avatar())
        .bind(agent.status())
        .bind(agent.current_task())
        .bind(agent.last_updated())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Agent>, StoreError> {
        let row = sqlx::query_as::<_, AgentRow>(
            r#"
            SELECT id, name, "role", avatar, status, current_task, last_updated
            FROM agents
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Agent::from))
    }

    async fn list(&self) -> Result<Vec<Agent>, StoreError> {
        let rows = sqlx::query_as::<_, AgentRow>(
            r#"
            SELECT id, name, "role", avatar, status, current_task, last_updated
            FROM agents
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Agent::from).collect())
    }

    async fn update_status(
        &self,
        id: &str,
        status: AgentStatus,
        current_task: Option<String>,
    ) -> Result<(), StoreError> {
        // GREATEST keeps last_updated monotonic across clock skew
        let result = sqlx::query(
            r#"
            UPDATE agents
            SET status = $2, current_task = $3, last_updated = GREATEST(last_updated, now())
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(current_task)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::AgentNotFound(id.to_string()));
        }

        Ok(())
    }
}
