//! Domain layer for estate-os
//!
//! This crate contains the core orchestration entities and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Module
//!
//! A business-domain grouping (valuation, leads, marketing, ...) bound to
//! exactly one Team. The module registry is the sole integration point a
//! front end uses.
//!
//! ## Team / Agent / Tool
//!
//! - **Team**: an ordered group of Agents exposing one aggregated run
//!   operation. The member order encodes the intended hand-off sequence.
//! - **Agent**: a configured role (model + tools + instructions). Agents are
//!   immutable configuration records, safe to share across requests.
//! - **Tool**: a deterministic or externally-dependent function an Agent may
//!   invoke mid-task, described by a typed parameter schema.

pub mod agent;
pub mod chat;
pub mod core;
pub mod module;
pub mod team;
pub mod tool;

// Re-export commonly used types
pub use agent::entities::{AgentProfile, KnowledgeHandle};
pub use chat::entities::{AttachmentRef, Message, render_attachments};
pub use core::{error::DomainError, model::Model};
pub use module::entities::{ModuleId, ModuleMetadata, ModuleStatus};
pub use team::{
    entities::TeamProfile,
    value_objects::{MemberReport, TeamRunReport},
};
pub use tool::{
    entities::{ParamType, ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    provider::ToolProvider,
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};
