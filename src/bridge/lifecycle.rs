use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, info};

use super::error::{BridgeError, TrackingError};
use super::status::StatusClient;
use super::transport::RelayTransport;

/// Spawn event: an agent has started work on a task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnPayload {
    pub agent_id: String,
    pub agent_name: String,
    pub task_description: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Completion event: an agent has finished its work
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionPayload {
    pub agent_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Error event: an agent has hit a failure it cannot recover from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub agent_id: String,
    pub error: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Stateless translator from agent lifecycle events to status mutations
///
/// The bridge tracks nothing itself; all agent state lives in the status
/// store, and every handler call is an independent request/response round
/// trip. Each event maps to exactly one semantic transition:
///
/// | event      | target  | side effects                        |
/// |------------|---------|-------------------------------------|
/// | spawn      | working | status update + pending task record |
/// | completion | idle    | status update, task cleared         |
/// | error      | blocked | status update, reason in task slot  |
///
/// Tracking failures are logged and handed back as a `TrackingError` side
/// channel instead of propagating: a broken dashboard must never abort
/// the agent's real work. Status tracking is therefore best-effort and
/// can lag behind real agent state.
pub struct LifecycleBridge {
    status: StatusClient,
    transport: Arc<dyn RelayTransport>,
}

impl LifecycleBridge {
    pub fn new(transport: Arc<dyn RelayTransport>) -> Self {
        Self {
            status: StatusClient::new(transport.clone()),
            transport,
        }
    }

    /// Handles a spawn event, marking the agent as working
    ///
    /// Issues two downstream calls: the working status update, then the
    /// task record, both carrying the payload's task description.
    pub async fn handle_agent_spawn(&self, payload: &SpawnPayload) -> Result<(), TrackingError> {
        info!(
            agent_id = %payload.agent_id,
            agent_name = %payload.agent_name,
            task = %payload.task_description,
            timestamp = %payload.timestamp,
            "agent spawned"
        );

        match self
            .status
            .mark_working(&payload.agent_id, &payload.task_description)
            .await
        {
            Ok(()) => {
                info!(agent_id = %payload.agent_id, "marked spawned agent as working");
                Ok(())
            }
            Err(source) => {
                error!(agent_id = %payload.agent_id, error = %source, "failed to track agent spawn");
                Err(TrackingError {
                    agent_id: payload.agent_id.clone(),
                    source,
                })
            }
        }
    }

    /// Handles a completion event, marking the agent as idle
    ///
    /// Idempotent by construction: the store writes the same idle state
    /// however often the event repeats.
    pub async fn handle_agent_completion(
        &self,
        payload: &CompletionPayload,
    ) -> Result<(), TrackingError> {
        info!(
            agent_id = %payload.agent_id,
            timestamp = %payload.timestamp,
            "agent completed"
        );

        match self.status.mark_idle(&payload.agent_id).await {
            Ok(()) => {
                info!(agent_id = %payload.agent_id, "marked completed agent as idle");
                Ok(())
            }
            Err(source) => {
                error!(agent_id = %payload.agent_id, error = %source, "failed to track agent completion");
                Err(TrackingError {
                    agent_id: payload.agent_id.clone(),
                    source,
                })
            }
        }
    }

    /// Handles an error event, marking the agent as blocked with the
    /// error message verbatim
    pub async fn handle_agent_error(&self, payload: &ErrorPayload) -> Result<(), TrackingError> {
        error!(
            agent_id = %payload.agent_id,
            error = %payload.error,
            timestamp = %payload.timestamp,
            "agent error"
        );

        match self
            .status
            .mark_blocked(&payload.agent_id, &payload.error)
            .await
        {
            Ok(()) => {
                info!(agent_id = %payload.agent_id, "marked errored agent as blocked");
                Ok(())
            }
            Err(source) => {
                error!(agent_id = %payload.agent_id, error = %source, "failed to track agent error");
                Err(TrackingError {
                    agent_id: payload.agent_id.clone(),
                    source,
                })
            }
        }
    }

    /// Registers an agent id with a display name and role
    ///
    /// Issues the creation request (default avatar "🤖") and returns the
    /// caller-supplied id: subsequent events reference the caller's
    /// naming scheme, not the store-generated identity, so registering
    /// the same logical agent twice creates duplicate store rows. Unlike
    /// the event handlers, registration fails loud.
    pub async fn register_agent(
        &self,
        agent_id: &str,
        name: &str,
        role: &str,
        avatar: Option<&str>,
    ) -> Result<String, BridgeError> {
        self.transport
            .send(
                "createAgent",
                json!({
                    "name": name,
                    "role": role,
                    "avatar": avatar.unwrap_or("🤖"),
                }),
            )
            .await
            .map_err(|e| BridgeError::Registration(e.to_string()))?;

        info!(agent_id, name, role, "registered agent");
        Ok(agent_id.to_string())
    }
}

/// Event-listener facade for wiring the bridge into an agent runtime
///
/// Each callback forwards to the matching lifecycle handler and discards
/// the tracking side channel, so no event ever raises.
#[derive(Clone)]
pub struct AgentEventListener {
    bridge: Arc<LifecycleBridge>,
}

impl AgentEventListener {
    pub fn new(bridge: Arc<LifecycleBridge>) -> Self {
        Self { bridge }
    }

    pub async fn on_spawn(&self, payload: &SpawnPayload) {
        let _ = self.bridge.handle_agent_spawn(payload).await;
    }

    pub async fn on_complete(&self, payload: &CompletionPayload) {
        let _ = self.bridge.handle_agent_completion(payload).await;
    }

    pub async fn on_error(&self, payload: &ErrorPayload) {
        let _ = self.bridge.handle_agent_error(payload).await;
    }
}

/// Config handed to an agent runtime when spawning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSpawnConfig {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
}

/// Outcome reported by the runtime after a spawn attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

/// Middleware form of the bridge, wrapping a generic
/// spawn/complete/error agent lifecycle
pub struct LifecycleMiddleware {
    bridge: Arc<LifecycleBridge>,
}

impl LifecycleMiddleware {
    pub fn new(bridge: Arc<LifecycleBridge>) -> Self {
        Self { bridge }
    }

    /// Pass-through hook before the runtime spawns an agent
    pub fn before_spawn(&self, config: AgentSpawnConfig) -> AgentSpawnConfig {
        debug!(agent_id = %config.id, name = %config.name, "beforeSpawn hook");
        config
    }

    /// Derives a spawn payload from the runtime's outcome and forwards
    /// it, handing the outcome back unchanged
    pub async fn after_spawn(
        &self,
        config: &AgentSpawnConfig,
        outcome: SpawnOutcome,
    ) -> SpawnOutcome {
        let payload = SpawnPayload {
            agent_id: outcome
                .agent_id
                .clone()
                .unwrap_or_else(|| config.id.clone()),
            agent_name: config.name.clone(),
            task_description: config
                .task
                .clone()
                .unwrap_or_else(|| "Assigned task".to_string()),
            timestamp: Utc::now(),
        };

        let _ = self.bridge.handle_agent_spawn(&payload).await;
        outcome
    }

    /// Derives a completion payload, forwards it, and hands the result
    /// back unchanged
    pub async fn on_complete(&self, agent_id: &str, result: Value) -> Value {
        let payload = CompletionPayload {
            agent_id: agent_id.to_string(),
            result: Some(result.to_string()),
            timestamp: Utc::now(),
        };

        let _ = self.bridge.handle_agent_completion(&payload).await;
        result
    }

    /// Forwards an error payload, then hands the original error back to
    /// the caller for re-raising
    ///
    /// The only propagating path in the bridge: the failure here is the
    /// agent's own, not a tracking one, so the caller's error handling
    /// must still fire.
    pub async fn on_error<E: std::fmt::Display>(&self, agent_id: &str, error: E) -> E {
        let payload = ErrorPayload {
            agent_id: agent_id.to_string(),
            error: error.to_string(),
            timestamp: Utc::now(),
        };

        let _ = self.bridge.handle_agent_error(&payload).await;
        error
    }
}
