//! Lifecycle bridge: translates agent lifecycle events (spawn,
//! completion, error) into Mission Control status updates.
//!
//! Layering, bottom up:
//! - [`transport`] — how one relay action gets posted
//! - [`status`] — one fail-loud helper per semantic transition
//! - [`lifecycle`] — the stateless event translator, its listener
//!   facade, and the middleware form

pub mod error;
pub mod lifecycle;
pub mod status;
pub mod transport;

pub use error::{BridgeError, TrackingError};
pub use lifecycle::{
    AgentEventListener, AgentSpawnConfig, CompletionPayload, ErrorPayload, LifecycleBridge,
    LifecycleMiddleware, SpawnOutcome, SpawnPayload,
};
pub use status::StatusClient;
pub use transport::{HttpRelayTransport, RelayTransport, TransportError};
