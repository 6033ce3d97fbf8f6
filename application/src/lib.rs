//! Application layer for estate-os
//!
//! Use cases (agent invocation, team runs) and the ports they depend on.
//! Adapters for the ports live in the infrastructure layer.

pub mod config;
pub mod ports;
pub mod use_cases;

pub use config::ExecutionParams;
pub use ports::{
    completion_gateway::{Completion, CompletionGateway, CompletionRequest, GatewayError},
    knowledge::{Document, KnowledgeError, KnowledgeIndex},
    progress::{NoProgress, ProgressNotifier},
    tool_executor::ToolExecutorPort,
};
pub use use_cases::{
    run_agent::{AgentOutcome, AgentRunError, RunAgentUseCase},
    run_team::{RunTeamInput, RunTeamUseCase, TeamRunError},
};
