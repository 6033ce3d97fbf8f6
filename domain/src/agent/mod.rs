//! Agent bounded context

pub mod entities;

pub use entities::{AgentProfile, KnowledgeHandle};
