//! Domain error taxonomy
//!
//! Every boundary in the orchestration core converts failures into one of
//! these typed variants before returning to its caller. Nothing is allowed
//! to crash the request-handling loop.

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Registry lookup failed, or the module's team failed to construct at
    /// startup. This is the only error shown verbatim to the end user.
    #[error("Module '{module}' is unavailable: {reason}")]
    ModuleUnavailable { module: String, reason: String },

    /// A tool call had bad or missing arguments, or the tool itself failed.
    /// Caught at the agent boundary and fed back to the model as context.
    #[error("Tool invocation failed: {0}")]
    ToolInvocation(String),

    /// The completion endpoint was unreachable or returned a malformed
    /// completion.
    #[error("Model call failed: {0}")]
    ModelCall(String),

    /// An external model or tool call exceeded its bounded timeout.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// One team member failed after retries; the others succeeded.
    #[error("Team step '{step}' failed: {reason}")]
    PartialTeamFailure { step: String, reason: String },

    /// A team was constructed with no members.
    #[error("Team '{0}' must have at least one member")]
    EmptyTeam(String),

    /// The caller stopped waiting; in-flight work is discarded.
    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    pub fn module_unavailable(module: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::ModuleUnavailable {
            module: module.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}
