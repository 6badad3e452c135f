//! Relay endpoint integration tests
//!
//! Drive the axum router directly (tower `oneshot`) against the
//! in-memory store: action dispatch, error mapping, and the stored state
//! the dashboard would poll.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use mission_control_api::api::handlers::relay;
use mission_control_api::api::state::AppState;
use mission_control_api::infrastructure::repositories::{
    InMemoryAgentRepository, InMemoryTaskRepository,
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for oneshot

/// Setup test application with routes
fn setup_app() -> Router {
    let state = AppState::new(
        Arc::new(InMemoryAgentRepository::new()),
        Arc::new(InMemoryTaskRepository::new()),
    );

    Router::new()
        .route("/health", get(relay::health_check))
        .route("/api/relay", post(relay::relay))
        .with_state(state)
}

/// Post one `{action, args}` body and return (status, parsed body)
async fn relay_call(app: &Router, action: &str, args: Value) -> (StatusCode, Value) {
    let body = json!({ "action": action, "args": args });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/relay")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create_agent(app: &Router, name: &str) -> String {
    let (status, body) = relay_call(
        app,
        "createAgent",
        json!({ "name": name, "role": "Researcher", "avatar": "🔎" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body.as_str().expect("agent id").to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_unknown_action_is_a_400_with_error_body() {
    let app = setup_app();

    let (status, body) = relay_call(&app, "dropEverything", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown action: dropEverything");
}

#[tokio::test]
async fn test_malformed_args_are_a_400() {
    let app = setup_app();

    let (status, body) = relay_call(&app, "updateAgentStatus", json!({ "status": "idle" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid args"));
}

#[tokio::test]
async fn test_create_agent_starts_idle_and_shows_up_in_list() {
    let app = setup_app();

    let agent_id = create_agent(&app, "Scout").await;

    let (status, body) = relay_call(&app, "listAgents", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let agents = body.as_array().unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0]["id"], agent_id);
    assert_eq!(agents[0]["name"], "Scout");
    assert_eq!(agents[0]["status"], "idle");
    assert!(agents[0].get("currentTask").is_none());
    assert!(agents[0]["lastUpdated"].is_i64());
}

#[tokio::test]
async fn test_create_agent_with_empty_name_is_a_400() {
    let app = setup_app();

    let (status, body) = relay_call(
        &app,
        "createAgent",
        json!({ "name": "", "role": "Researcher", "avatar": "🔎" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Agent name cannot be empty");
}

#[tokio::test]
async fn test_update_status_for_unknown_agent_is_a_500() {
    let app = setup_app();

    let (status, body) = relay_call(
        &app,
        "updateAgentStatus",
        json!({ "agentId": "missing", "status": "working", "currentTask": "x" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("missing"));
}

#[tokio::test]
async fn test_working_flow_updates_agent_and_records_task() {
    let app = setup_app();
    let agent_id = create_agent(&app, "Scout").await;

    let (status, _) = relay_call(
        &app,
        "updateAgentStatus",
        json!({ "agentId": agent_id, "status": "working", "currentTask": "index docs" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, task_id) = relay_call(
        &app,
        "createTask",
        json!({ "agentId": agent_id, "description": "index docs" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(task_id.is_string());

    let (status, agent) =
        relay_call(&app, "getAgentStatus", json!({ "agentId": agent_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(agent["status"], "working");
    assert_eq!(agent["currentTask"], "index docs");

    let (status, tasks) = relay_call(&app, "getAgentTasks", json!({ "agentId": agent_id })).await;
    assert_eq!(status, StatusCode::OK);
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["agentId"], agent_id);
    assert_eq!(tasks[0]["description"], "index docs");
    assert_eq!(tasks[0]["status"], "pending");
}

#[tokio::test]
async fn test_idle_update_clears_the_current_task() {
    let app = setup_app();
    let agent_id = create_agent(&app, "Scout").await;

    relay_call(
        &app,
        "updateAgentStatus",
        json!({ "agentId": agent_id, "status": "working", "currentTask": "index docs" }),
    )
    .await;
    relay_call(
        &app,
        "updateAgentStatus",
        json!({ "agentId": agent_id, "status": "idle" }),
    )
    .await;

    let (_, agent) = relay_call(&app, "getAgentStatus", json!({ "agentId": agent_id })).await;
    assert_eq!(agent["status"], "idle");
    assert!(agent.get("currentTask").is_none());
}

#[tokio::test]
async fn test_get_agent_status_for_unknown_agent_is_null() {
    let app = setup_app();

    let (status, body) = relay_call(&app, "getAgentStatus", json!({ "agentId": "missing" })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}

#[tokio::test]
async fn test_update_task_status_moves_the_task() {
    let app = setup_app();
    let agent_id = create_agent(&app, "Scout").await;

    let (_, task_id) = relay_call(
        &app,
        "createTask",
        json!({ "agentId": agent_id, "description": "index docs" }),
    )
    .await;

    let (status, _) = relay_call(
        &app,
        "updateTaskStatus",
        json!({ "taskId": task_id, "status": "in_progress" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, tasks) = relay_call(&app, "getAgentTasks", json!({ "agentId": agent_id })).await;
    assert_eq!(tasks[0]["status"], "in_progress");
}

#[tokio::test]
async fn test_create_task_does_not_require_a_registered_agent() {
    let app = setup_app();

    let (status, task_id) = relay_call(
        &app,
        "createTask",
        json!({ "agentId": "never-registered", "description": "orphan" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(task_id.is_string());

    let (_, tasks) = relay_call(
        &app,
        "getAgentTasks",
        json!({ "agentId": "never-registered" }),
    )
    .await;
    assert_eq!(tasks.as_array().unwrap().len(), 1);
}
