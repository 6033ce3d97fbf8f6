//! Tool provider abstraction
//!
//! A [`ToolProvider`] is a source of tools that can be mounted into a tool
//! registry. Each business module ships one provider exposing its stub
//! scrapers, calculators and parsers; the registry merges them into a single
//! spec and routes calls back to the owning provider.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    ToolRegistry                     │
//! │     (merges specs, routes calls by tool name)       │
//! └─────────────────────────────────────────────────────┘
//!       │           │           │            │
//!       ▼           ▼           ▼            ▼
//!  ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐
//!  │valuation│ │ search  │ │investment│ │  legal  │ ...
//!  └─────────┘ └─────────┘ └──────────┘ └─────────┘
//! ```

use async_trait::async_trait;

use super::entities::{ToolCall, ToolSpec};
use super::value_objects::ToolResult;

/// Tool provider abstraction - a source of tools
///
/// Providers are constructed once at startup and immutable thereafter. A
/// provider's spec declares the tools it can execute; `execute` must handle
/// every tool in the spec and answer unknown names with a typed `NOT_FOUND`
/// failure rather than panicking.
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// Unique identifier for this provider (e.g., "valuation", "financing")
    fn id(&self) -> &str;

    /// Display name for user-facing output
    fn display_name(&self) -> &str;

    /// The tools this provider can execute
    fn tool_spec(&self) -> &ToolSpec;

    /// Execute a tool call
    ///
    /// The tool_name in the call must match one of the tools in
    /// `tool_spec()`. Failures are reported through the returned
    /// [`ToolResult`], never by panicking.
    async fn execute(&self, call: &ToolCall) -> ToolResult;

    /// Check if this provider has a specific tool
    fn has_tool(&self, tool_name: &str) -> bool {
        self.tool_spec().contains(tool_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::ToolDefinition;
    use crate::tool::value_objects::ToolError;
    use serde_json::json;

    struct MockProvider {
        spec: ToolSpec,
    }

    impl MockProvider {
        fn new() -> Self {
            Self {
                spec: ToolSpec::new()
                    .register(ToolDefinition::new("avm_engine", "Quick value estimate")),
            }
        }
    }

    #[async_trait]
    impl ToolProvider for MockProvider {
        fn id(&self) -> &str {
            "mock"
        }

        fn display_name(&self) -> &str {
            "Mock Provider"
        }

        fn tool_spec(&self) -> &ToolSpec {
            &self.spec
        }

        async fn execute(&self, call: &ToolCall) -> ToolResult {
            if self.has_tool(&call.tool_name) {
                ToolResult::success(&call.tool_name, json!({"estimated_value": 250_000}))
            } else {
                ToolResult::failure(&call.tool_name, ToolError::not_found(&call.tool_name))
            }
        }
    }

    #[tokio::test]
    async fn test_provider_spec_and_execute() {
        let provider = MockProvider::new();

        assert!(provider.has_tool("avm_engine"));
        assert!(!provider.has_tool("unknown"));

        let result = provider.execute(&ToolCall::new("avm_engine")).await;
        assert!(result.is_success());

        let result = provider.execute(&ToolCall::new("unknown")).await;
        assert_eq!(result.error().map(|e| e.code.as_str()), Some("NOT_FOUND"));
    }
}
