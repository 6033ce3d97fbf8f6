//! Infrastructure layer for estate-os
//!
//! Adapters for the application-layer ports: the HTTP completion gateway,
//! the per-module tool providers and their registry, the module catalog,
//! document storage, configuration loading and transcript logging.

pub mod config;
pub mod documents;
pub mod gateway;
pub mod logging;
pub mod modules;
pub mod tools;

pub use config::{ConfigLoader, FileConfig};
pub use documents::DocumentStore;
pub use gateway::HttpCompletionGateway;
pub use logging::JsonlTranscriptLogger;
pub use modules::ModuleRegistry;
pub use tools::ToolRegistry;
