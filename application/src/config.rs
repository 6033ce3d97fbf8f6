//! Execution parameters shared by the run use cases

use std::time::Duration;

/// Bounds applied to every agent invocation and team run
#[derive(Debug, Clone)]
pub struct ExecutionParams {
    /// Timeout applied to each external model or tool call
    pub call_timeout: Duration,
    /// Attempts per team member before degrading to a partial response
    pub member_attempts: u32,
    /// Tool-call rounds an agent may use before being asked for a final
    /// answer
    pub max_tool_rounds: u32,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(30),
            member_attempts: 2,
            max_tool_rounds: 4,
        }
    }
}

impl ExecutionParams {
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_member_attempts(mut self, attempts: u32) -> Self {
        self.member_attempts = attempts.max(1);
        self
    }

    pub fn with_max_tool_rounds(mut self, rounds: u32) -> Self {
        self.max_tool_rounds = rounds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ExecutionParams::default();
        assert_eq!(params.call_timeout, Duration::from_secs(30));
        assert_eq!(params.member_attempts, 2);
        assert_eq!(params.max_tool_rounds, 4);
    }

    #[test]
    fn test_member_attempts_floor() {
        let params = ExecutionParams::default().with_member_attempts(0);
        assert_eq!(params.member_attempts, 1);
    }
}
