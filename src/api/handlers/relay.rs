use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::agent::{Agent, AgentStatus};
use crate::domain::task::{Task, TaskStatus};

/// Request body for the relay endpoint: a named store action plus its
/// JSON arguments
#[derive(Debug, Deserialize)]
pub struct RelayRequest {
    pub action: String,
    #[serde(default)]
    pub args: Value,
}

/// Agent document as served to pollers
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub id: String,
    pub name: String,
    pub role: String,
    pub avatar: String,
    pub status: AgentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_task: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_updated: DateTime<Utc>,
}

impl From<&Agent> for AgentResponse {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id().to_string(),
            name: agent.name().to_string(),
            role: agent.role().to_string(),
            avatar: agent.avatar().to_string(),
            status: agent.status(),
            current_task: agent.current_task().map(str::to_string),
            last_updated: agent.last_updated(),
        }
    }
}

/// Task document as served to pollers
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: String,
    pub agent_id: String,
    pub description: String,
    pub status: TaskStatus,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            agent_id: task.agent_id().to_string(),
            description: task.description().to_string(),
            status: task.status(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateAgentStatusArgs {
    agent_id: String,
    status: AgentStatus,
    #[serde(default)]
    current_task: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskArgs {
    agent_id: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct CreateAgentArgs {
    name: String,
    role: String,
    avatar: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgentIdArgs {
    agent_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTaskStatusArgs {
    task_id: String,
    status: TaskStatus,
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ApiError> {
    serde_json::from_value(args).map_err(|e| ApiError::bad_request(format!("Invalid args: {}", e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::internal_server_error(format!("Serialization error: {}", e)))
}

/// Relay endpoint: dispatches `{action, args}` to the status store
///
/// POST /api/relay
///
/// Unknown actions and malformed args answer 400; store failures answer
/// 500. Successful responses carry the raw result of the store call.
pub async fn relay(
    State(state): State<AppState>,
    Json(req): Json<RelayRequest>,
) -> Result<Json<Value>, ApiError> {
    tracing::info!(action = %req.action, "relay action");

    match req.action.as_str() {
        "updateAgentStatus" => {
            let args: UpdateAgentStatusArgs = parse_args(req.args)?;
            state
                .agents
                .update_status(&args.agent_id, args.status, args.current_task)
                .await?;
            Ok(Json(Value::Null))
        }
        "createTask" => {
            let args: CreateTaskArgs = parse_args(req.args)?;
            let task = Task::create(args.agent_id, args.description).map_err(ApiError::bad_request)?;
            state.tasks.insert(&task).await?;
            Ok(Json(json!(task.id())))
        }
        "createAgent" => {
            let args: CreateAgentArgs = parse_args(req.args)?;
            let agent =
                Agent::register(args.name, args.role, args.avatar).map_err(ApiError::bad_request)?;
            state.agents.insert(&agent).await?;
            Ok(Json(json!(agent.id())))
        }
        "getAgentStatus" => {
            let args: AgentIdArgs = parse_args(req.args)?;
            let agent = state.agents.find_by_id(&args.agent_id).await?;
            match agent {
                Some(agent) => Ok(Json(to_json(&AgentResponse::from(&agent))?)),
                None => Ok(Json(Value::Null)),
            }
        }
        "listAgents" => {
            let agents = state.agents.list().await?;
            let docs: Vec<AgentResponse> = agents.iter().map(AgentResponse::from).collect();
            Ok(Json(to_json(&docs)?))
        }
        "getAgentTasks" => {
            let args: AgentIdArgs = parse_args(req.args)?;
            let tasks = state.tasks.find_by_agent(&args.agent_id).await?;
            let docs: Vec<TaskResponse> = tasks.iter().map(TaskResponse::from).collect();
            Ok(Json(to_json(&docs)?))
        }
        "updateTaskStatus" => {
            let args: UpdateTaskStatusArgs = parse_args(req.args)?;
            state.tasks.update_status(&args.task_id, args.status).await?;
            Ok(Json(Value::Null))
        }
        other => Err(ApiError::bad_request(format!("Unknown action: {}", other))),
    }
}

/// Liveness probe
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
