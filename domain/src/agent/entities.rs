//! Agent domain entities

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Binding to an optional knowledge-retrieval index.
///
/// Disabled by default; agents configured with a handle may ground their
/// answers in retrieved documents when a retrieval adapter is wired in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeHandle {
    /// Name of the retrieval index/collection
    pub index: String,
    /// Maximum number of documents to retrieve per query
    pub max_results: usize,
}

impl KnowledgeHandle {
    pub fn new(index: impl Into<String>, max_results: usize) -> Self {
        Self {
            index: index.into(),
            max_results,
        }
    }
}

/// A named role wrapping a model endpoint, a capability set and steering
/// text (Entity).
///
/// An agent is a configuration record, not an active process: it has no
/// per-call mutable state and is safe to share across concurrent requests.
/// Behavior is steered solely by `description` and `instructions`; the only
/// runtime logic is the model call and the tool dispatch loop, both owned by
/// the application layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Role name (e.g., "Data Collector Agent")
    pub name: String,
    /// Opaque handle to the remote completion endpoint
    pub model: Model,
    /// One-paragraph summary of what this role is for
    pub description: String,
    /// Natural-language operating instructions
    pub instructions: String,
    /// Names of the tools this agent may invoke
    pub tools: Vec<String>,
    /// Optional knowledge-retrieval binding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge: Option<KnowledgeHandle>,
}

impl AgentProfile {
    pub fn new(name: impl Into<String>, model: Model) -> Self {
        Self {
            name: name.into(),
            model,
            description: String::new(),
            instructions: String::new(),
            tools: Vec::new(),
            knowledge: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tools.push(tool.into());
        self
    }

    pub fn with_tools(mut self, tools: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tools.extend(tools.into_iter().map(Into::into));
        self
    }

    pub fn with_knowledge(mut self, knowledge: KnowledgeHandle) -> Self {
        self.knowledge = Some(knowledge);
        self
    }

    /// Compose the system prompt for this role from its description and
    /// instructions.
    pub fn system_prompt(&self) -> String {
        let description = self.description.trim();
        let instructions = self.instructions.trim();
        match (description.is_empty(), instructions.is_empty()) {
            (true, true) => format!("You are {}.", self.name),
            (false, true) => description.to_string(),
            (true, false) => instructions.to_string(),
            (false, false) => format!("{}\n\n{}", description, instructions),
        }
    }
}
