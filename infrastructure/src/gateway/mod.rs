//! Completion gateway adapters

pub mod http;
pub mod scripted;

pub use http::HttpCompletionGateway;
pub use scripted::ScriptedGateway;
