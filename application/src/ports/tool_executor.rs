//! Tool executor port

use async_trait::async_trait;
use estate_domain::{ToolCall, ToolDefinition, ToolResult, ToolSpec};

/// Port over the tool registry
///
/// Use cases look up definitions for validation and dispatch calls
/// without knowing which provider owns which tool.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Aggregated specification of every registered tool
    fn tool_spec(&self) -> &ToolSpec;

    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().contains(name)
    }

    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_spec().get(name)
    }

    /// Execute one tool call. Failures are reported inside the returned
    /// ToolResult, never as a transport error.
    async fn execute(&self, call: &ToolCall) -> ToolResult;
}
