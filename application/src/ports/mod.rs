//! Ports - interfaces the application layer depends on
//!
//! Adapters live in the infrastructure layer and are injected at startup.

pub mod completion_gateway;
pub mod knowledge;
pub mod progress;
pub mod tool_executor;
