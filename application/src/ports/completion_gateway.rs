//! Completion gateway port
//!
//! Abstracts the chat-completion provider so use cases stay testable
//! without network access.

use async_trait::async_trait;
use estate_domain::{Model, ToolCall, ToolDefinition};
use thiserror::Error;

/// Errors a completion gateway can surface
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed completion: {0}")]
    MalformedCompletion(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Gateway timeout: {0}")]
    Timeout(String),

    #[error("{0}")]
    Other(String),
}

/// One request to the completion provider
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model to route the request to
    pub model: Model,
    /// System prompt (agent persona and instructions)
    pub system: String,
    /// User-visible task text, including any tool feedback
    pub prompt: String,
    /// Tools the model may call. Empty means a plain text answer is
    /// expected.
    pub tools: Vec<ToolDefinition>,
}

impl CompletionRequest {
    pub fn new(model: Model, system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model,
            system: system.into(),
            prompt: prompt.into(),
            tools: Vec::new(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }
}

/// What the provider returned for one request
#[derive(Debug, Clone, Default)]
pub struct Completion {
    /// Assistant text, possibly empty when only tool calls were emitted
    pub text: String,
    /// Tool calls requested by the model, in emission order
    pub tool_calls: Vec<ToolCall>,
}

impl Completion {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tool_calls: Vec::new(),
        }
    }

    pub fn with_tool_calls(mut self, calls: Vec<ToolCall>) -> Self {
        self.tool_calls = calls;
        self
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Port to the chat-completion provider
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GatewayError>;
}
