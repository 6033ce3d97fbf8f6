//! Tool registry
//!
//! Aggregates the per-module providers into one [`ToolExecutorPort`].
//! Tool names are expected to be globally unique; when two providers claim
//! the same name the first mount wins and the conflict is logged.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use estate_application::ports::tool_executor::ToolExecutorPort;
use estate_domain::{ToolCall, ToolError, ToolProvider, ToolResult, ToolSpec};
use tracing::{debug, warn};

/// Registry routing tool calls to the provider that owns them
pub struct ToolRegistry {
    providers: Vec<Arc<dyn ToolProvider>>,
    /// Tool name -> index into `providers`
    tool_mapping: HashMap<String, usize>,
    /// Merged specification across all providers
    tool_spec: ToolSpec,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            tool_mapping: HashMap::new(),
            tool_spec: ToolSpec::new(),
        }
    }

    /// Registry pre-loaded with all six module providers
    pub fn with_module_providers() -> Self {
        let mut registry = Self::new();
        for provider in super::all_providers() {
            registry = registry.register(provider);
        }
        registry
    }

    /// Mount a provider, merging its spec. First registration of a tool
    /// name wins.
    pub fn register<P: ToolProvider + 'static>(self, provider: P) -> Self {
        self.register_arc(Arc::new(provider))
    }

    pub fn register_arc(mut self, provider: Arc<dyn ToolProvider>) -> Self {
        let index = self.providers.len();
        for tool in provider.tool_spec().all() {
            if self.tool_mapping.contains_key(&tool.name) {
                warn!(
                    tool = %tool.name,
                    provider = provider.id(),
                    "Tool already registered by an earlier provider, skipping"
                );
                continue;
            }
            debug!(tool = %tool.name, provider = provider.id(), "Registered tool");
            self.tool_mapping.insert(tool.name.clone(), index);
            self.tool_spec = self.tool_spec.register(tool.clone());
        }
        self.providers.push(provider);
        self
    }

    pub fn provider_ids(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    /// All mounted providers, in registration order
    pub fn providers(&self) -> &[Arc<dyn ToolProvider>] {
        &self.providers
    }

    pub fn tool_count(&self) -> usize {
        self.tool_mapping.len()
    }

    fn provider_for(&self, tool_name: &str) -> Option<&Arc<dyn ToolProvider>> {
        self.tool_mapping
            .get(tool_name)
            .and_then(|index| self.providers.get(*index))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        match self.provider_for(&call.tool_name) {
            Some(provider) => provider.execute(call).await,
            None => ToolResult::failure(
                &call.tool_name,
                ToolError::not_found(format!("Tool not found: {}", call.tool_name)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{financing, investment};
    use serde_json::json;

    #[tokio::test]
    async fn test_registry_mounts_all_modules() {
        let registry = ToolRegistry::with_module_providers();

        assert_eq!(registry.tool_count(), 21);
        assert!(registry.has_tool("avm_engine"));
        assert!(registry.has_tool("roi_calculator"));
        assert!(registry.has_tool("payment_simulator_engine"));
        assert!(registry.has_tool("contract_nlp_tool"));
        assert_eq!(registry.provider_ids().len(), 6);
    }

    #[tokio::test]
    async fn test_registry_routes_to_owning_provider() {
        let registry = ToolRegistry::with_module_providers();

        let call = ToolCall::new(investment::ROI_CALCULATOR)
            .with_arg("property_price", 2_000_000)
            .with_arg("rental_income", 120_000)
            .with_arg("expenses", 20_000);
        let result = registry.execute(&call).await;

        assert!(result.is_success());
        assert_eq!(result.output().and_then(|o| o["roi"].as_f64()), Some(0.05));
    }

    #[tokio::test]
    async fn test_registry_unknown_tool() {
        let registry = ToolRegistry::with_module_providers();
        let result = registry.execute(&ToolCall::new("unknown_tool")).await;

        assert!(!result.is_success());
        assert_eq!(result.error().map(|e| e.code.as_str()), Some("NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_registry_applies_parameter_defaults() {
        let registry = ToolRegistry::with_module_providers();

        // max_dti defaults to 0.4 when omitted
        let call = ToolCall::new(financing::ELIGIBILITY_CHECKER_ENGINE)
            .with_arg("monthly_debt", 10_000)
            .with_arg("income", 25_000)
            .with_arg("credit_score", 700);
        let result = registry.execute(&call).await;
        assert_eq!(
            result.output().and_then(|o| o["eligible"].as_bool()),
            Some(true)
        );
    }

    #[tokio::test]
    async fn test_duplicate_tool_first_mount_wins() {
        let registry = ToolRegistry::new()
            .register(investment::provider())
            .register(investment::provider());

        assert_eq!(registry.tool_count(), 3);

        let call = ToolCall::new(investment::RISK_ANALYSIS)
            .with_arg("market_trends", json!({"volatility": 0.2}))
            .with_arg("roi_metrics", json!({"roi": 0.05}));
        let result = registry.execute(&call).await;
        assert!(result.is_success());
    }
}
