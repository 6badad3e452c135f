//! Mission Control API Library
//!
//! Backend for a real-time agent status dashboard: a relay endpoint over
//! a status store of agents and tasks, plus the lifecycle bridge that
//! maps agent spawn/completion/error events onto status updates.

pub mod api;
pub mod bridge;
pub mod domain;
pub mod infrastructure;
