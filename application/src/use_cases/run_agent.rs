//! Run Agent use case
//!
//! Drives one agent through a bounded tool-feedback loop: call the model,
//! execute any tool calls it emits, feed the results back as context, and
//! repeat until the model answers in plain text or the round budget runs
//! out. Tool failures are reported back to the model as context; only
//! model-call failures, timeouts, and cancellation abort the run.

use crate::config::ExecutionParams;
use crate::ports::completion_gateway::{CompletionGateway, CompletionRequest, GatewayError};
use crate::ports::knowledge::KnowledgeIndex;
use crate::ports::progress::ProgressNotifier;
use crate::ports::tool_executor::ToolExecutorPort;
use estate_domain::{
    AgentProfile, DefaultToolValidator, ToolDefinition, ToolError, ToolResult, ToolValidator,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Errors that abort an agent invocation
#[derive(Error, Debug)]
pub enum AgentRunError {
    #[error("Model call failed: {0}")]
    ModelCall(String),

    #[error("Agent call timed out: {0}")]
    Timeout(String),

    #[error("Agent run cancelled")]
    Cancelled,
}

impl From<GatewayError> for AgentRunError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Timeout(msg) => AgentRunError::Timeout(msg),
            other => AgentRunError::ModelCall(other.to_string()),
        }
    }
}

/// What one agent invocation produced
#[derive(Debug, Clone)]
pub struct AgentOutcome {
    /// Agent that produced the response
    pub agent: String,
    /// Final plain-text response
    pub text: String,
    /// Every tool result produced along the way, in execution order
    pub tool_results: Vec<ToolResult>,
    /// Model-call rounds consumed
    pub rounds: u32,
}

/// Use case for invoking a single agent
pub struct RunAgentUseCase<G: CompletionGateway + 'static> {
    gateway: Arc<G>,
    tools: Arc<dyn ToolExecutorPort>,
    knowledge: Option<Arc<dyn KnowledgeIndex>>,
    params: ExecutionParams,
}

impl<G: CompletionGateway + 'static> RunAgentUseCase<G> {
    pub fn new(gateway: Arc<G>, tools: Arc<dyn ToolExecutorPort>) -> Self {
        Self {
            gateway,
            tools,
            knowledge: None,
            params: ExecutionParams::default(),
        }
    }

    pub fn with_knowledge(mut self, knowledge: Arc<dyn KnowledgeIndex>) -> Self {
        self.knowledge = Some(knowledge);
        self
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    /// Execute the agent against a task
    pub async fn execute(
        &self,
        profile: &AgentProfile,
        task: &str,
        cancel: &CancellationToken,
        progress: &dyn ProgressNotifier,
    ) -> Result<AgentOutcome, AgentRunError> {
        if cancel.is_cancelled() {
            return Err(AgentRunError::Cancelled);
        }

        let system = profile.system_prompt();
        let definitions = self.resolve_tools(profile);
        let mut prompt = String::new();

        if let Some(context) = self.knowledge_context(profile, task).await {
            prompt.push_str(&context);
            prompt.push_str("\n\n");
        }
        prompt.push_str(task);

        let validator = DefaultToolValidator;
        let mut tool_results = Vec::new();
        let mut rounds = 0u32;

        loop {
            if cancel.is_cancelled() {
                return Err(AgentRunError::Cancelled);
            }

            // The last permitted round withholds the tool list so the
            // model has to produce a final answer.
            let final_round = rounds >= self.params.max_tool_rounds;
            let offered = if final_round {
                Vec::new()
            } else {
                definitions.clone()
            };

            let request = CompletionRequest::new(profile.model.clone(), &system, &prompt)
                .with_tools(offered);

            let completion = match tokio::time::timeout(
                self.params.call_timeout,
                self.gateway.complete(request),
            )
            .await
            {
                Ok(result) => result?,
                Err(_) => {
                    return Err(AgentRunError::Timeout(format!(
                        "model call for agent '{}' exceeded {:?}",
                        profile.name, self.params.call_timeout
                    )));
                }
            };
            rounds += 1;

            if !completion.has_tool_calls() || final_round {
                return Ok(AgentOutcome {
                    agent: profile.name.clone(),
                    text: completion.text,
                    tool_results,
                    rounds,
                });
            }

            let mut round_results = Vec::new();
            for call in &completion.tool_calls {
                if cancel.is_cancelled() {
                    return Err(AgentRunError::Cancelled);
                }
                let result = self.run_tool_call(call, &validator).await;
                progress.on_tool_call(&profile.name, &result.tool_name, result.is_success());
                round_results.push(result);
            }

            prompt.push_str("\n\n## Tool results\n");
            for result in &round_results {
                let rendered = serde_json::to_string(result)
                    .unwrap_or_else(|_| format!("{{\"tool_name\":\"{}\"}}", result.tool_name));
                prompt.push_str(&rendered);
                prompt.push('\n');
            }
            tool_results.extend(round_results);
        }
    }

    /// Definitions for the tools the profile names. Unknown names are
    /// logged and skipped so one bad profile entry does not sink the run.
    fn resolve_tools(&self, profile: &AgentProfile) -> Vec<ToolDefinition> {
        let mut definitions = Vec::new();
        for name in &profile.tools {
            match self.tools.get_tool(name) {
                Some(definition) => definitions.push(definition.clone()),
                None => warn!(
                    "Agent '{}' references unknown tool '{}', skipping",
                    profile.name, name
                ),
            }
        }
        definitions
    }

    /// Retrieve reference material for agents with a knowledge handle.
    /// Query failures degrade to a run without context.
    async fn knowledge_context(&self, profile: &AgentProfile, task: &str) -> Option<String> {
        let handle = profile.knowledge.as_ref()?;
        let index = self.knowledge.as_ref()?;

        match index.query(task, handle.max_results).await {
            Ok(documents) if !documents.is_empty() => {
                debug!(
                    "Retrieved {} documents for agent '{}'",
                    documents.len(),
                    profile.name
                );
                let mut block = String::from("## Reference material\n");
                for doc in &documents {
                    block.push_str(&format!("### {}\n{}\n", doc.source, doc.content));
                }
                Some(block)
            }
            Ok(_) => None,
            Err(e) => {
                warn!(
                    "Knowledge query failed for agent '{}': {}, continuing without context",
                    profile.name, e
                );
                None
            }
        }
    }

    /// Validate and execute one tool call. Every failure mode produces a
    /// failed ToolResult for the model to see.
    async fn run_tool_call(
        &self,
        call: &estate_domain::ToolCall,
        validator: &DefaultToolValidator,
    ) -> ToolResult {
        let Some(definition) = self.tools.get_tool(&call.tool_name) else {
            return ToolResult::failure(&call.tool_name, ToolError::not_found(&call.tool_name));
        };

        let call = call.clone().with_defaults(definition);
        if let Err(e) = validator.validate(&call, definition) {
            return ToolResult::failure(&call.tool_name, e);
        }

        match tokio::time::timeout(self.params.call_timeout, self.tools.execute(&call)).await {
            Ok(result) => result,
            Err(_) => ToolResult::failure(&call.tool_name, ToolError::timeout(&call.tool_name)),
        }
    }
}
