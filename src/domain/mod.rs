// Domain layer module exports
// Domain is independent of transport and storage concerns

pub mod agent;
pub mod repositories;
pub mod task;
