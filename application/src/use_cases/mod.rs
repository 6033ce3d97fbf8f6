//! Application use cases

pub mod run_agent;
pub mod run_team;
