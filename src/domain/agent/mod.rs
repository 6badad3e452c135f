pub mod agent;
pub mod value_objects;

pub use agent::Agent;
pub use value_objects::AgentStatus;
