//! Run Team use case
//!
//! Orchestrates one team run: members execute sequentially in profile
//! order, each seeing the original request plus the hand-off notes of the
//! members before it. A member gets a bounded number of attempts; when it
//! still fails the run degrades to a partial report instead of erroring,
//! so the caller always receives a non-empty response.

use crate::config::ExecutionParams;
use crate::ports::completion_gateway::CompletionGateway;
use crate::ports::knowledge::KnowledgeIndex;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::run_agent::{AgentRunError, RunAgentUseCase};
use estate_domain::{render_attachments, AttachmentRef, MemberReport, TeamProfile, TeamRunReport};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Errors that abort a team run.
///
/// Member failures degrade to a partial report; only cancellation
/// propagates as an error.
#[derive(Error, Debug)]
pub enum TeamRunError {
    #[error("Team run cancelled")]
    Cancelled,
}

/// Input for one team run
#[derive(Debug, Clone)]
pub struct RunTeamInput {
    /// The user's request
    pub message: String,
    /// Files uploaded alongside the request, already persisted
    pub attachments: Vec<AttachmentRef>,
}

impl RunTeamInput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<AttachmentRef>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// Use case for running a team against a request
pub struct RunTeamUseCase<G: CompletionGateway + 'static> {
    runner: RunAgentUseCase<G>,
    params: ExecutionParams,
}

impl<G: CompletionGateway + 'static> RunTeamUseCase<G> {
    pub fn new(gateway: Arc<G>, tools: Arc<dyn ToolExecutorPort>) -> Self {
        Self {
            runner: RunAgentUseCase::new(gateway, tools),
            params: ExecutionParams::default(),
        }
    }

    pub fn with_knowledge(mut self, knowledge: Arc<dyn KnowledgeIndex>) -> Self {
        self.runner = self.runner.with_knowledge(knowledge);
        self
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.runner = self.runner.with_params(params.clone());
        self.params = params;
        self
    }

    /// Execute the team with default (no-op) progress
    pub async fn execute(
        &self,
        team: &TeamProfile,
        input: RunTeamInput,
        cancel: &CancellationToken,
    ) -> Result<TeamRunReport, TeamRunError> {
        self.execute_with_progress(team, input, cancel, &NoProgress)
            .await
    }

    /// Execute the team with progress callbacks
    pub async fn execute_with_progress(
        &self,
        team: &TeamProfile,
        input: RunTeamInput,
        cancel: &CancellationToken,
        progress: &dyn ProgressNotifier,
    ) -> Result<TeamRunReport, TeamRunError> {
        let request = format!(
            "{}{}",
            input.message,
            render_attachments(&input.attachments)
        );
        let total = team.len();
        info!("Running team '{}' with {} members", team.name, total);

        let mut member_reports: Vec<MemberReport> = Vec::with_capacity(total);
        let mut hand_off = String::new();

        for (index, member) in team.members().iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(TeamRunError::Cancelled);
            }
            progress.on_member_start(&team.name, &member.name, index, total);

            let task = self.compose_task(team, &request, &hand_off);
            match self.run_member(member, &task, cancel, progress).await? {
                (attempts, Ok(text)) => {
                    progress.on_member_complete(&member.name, true, attempts);
                    hand_off.push_str(&format!("## {}\n{}\n\n", member.name, text));
                    member_reports.push(MemberReport::succeeded(&member.name, attempts, text));
                }
                (attempts, Err(reason)) => {
                    warn!(
                        "Team '{}' member '{}' failed after {} attempts: {}",
                        team.name, member.name, attempts, reason
                    );
                    progress.on_member_complete(&member.name, false, attempts);
                    member_reports.push(MemberReport::failed(&member.name, attempts, &reason));

                    let response = self.partial_response(&member_reports, index, &member.name);
                    return Ok(TeamRunReport::partial(
                        &team.name,
                        response,
                        &member.name,
                        member_reports,
                    ));
                }
            }
        }

        // The last member's response is the team's aggregated answer.
        let response = member_reports
            .last()
            .and_then(|r| r.response.clone())
            .unwrap_or_default();
        Ok(TeamRunReport::complete(&team.name, response, member_reports))
    }

    /// Run one member with bounded retries. The outer Result carries
    /// cancellation; the inner one the member's final outcome.
    async fn run_member(
        &self,
        member: &estate_domain::AgentProfile,
        task: &str,
        cancel: &CancellationToken,
        progress: &dyn ProgressNotifier,
    ) -> Result<(u32, Result<String, String>), TeamRunError> {
        let mut last_error = String::new();
        for attempt in 1..=self.params.member_attempts {
            match self.runner.execute(member, task, cancel, progress).await {
                Ok(outcome) => return Ok((attempt, Ok(outcome.text))),
                Err(AgentRunError::Cancelled) => return Err(TeamRunError::Cancelled),
                Err(e) => {
                    last_error = e.to_string();
                    if attempt < self.params.member_attempts {
                        progress.on_retry(&member.name, attempt);
                        warn!(
                            "Member '{}' attempt {} failed: {}, retrying",
                            member.name, attempt, last_error
                        );
                    }
                }
            }
        }
        Ok((self.params.member_attempts, Err(last_error)))
    }

    fn compose_task(&self, team: &TeamProfile, request: &str, hand_off: &str) -> String {
        let mut task = String::new();
        if !team.instructions.trim().is_empty() {
            task.push_str(&format!("# Team briefing\n{}\n\n", team.instructions.trim()));
        }
        task.push_str(&format!("# Request\n{}\n", request));
        if !hand_off.is_empty() {
            task.push_str(&format!("\n# Hand-off notes\n{}", hand_off));
        }
        task
    }

    /// Degraded response for a run whose step `index` failed. Earlier
    /// successful output is kept; the failure is described without leaking
    /// raw errors.
    fn partial_response(&self, reports: &[MemberReport], index: usize, failed: &str) -> String {
        let mut response = String::new();
        for report in reports.iter().filter(|r| r.success) {
            if let Some(text) = &report.response {
                response.push_str(&format!("## {}\n{}\n\n", report.agent, text));
            }
        }
        response.push_str(&format!(
            "Note: step {} ({}) did not complete, so these results are partial.",
            index + 1,
            failed
        ));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::completion_gateway::{Completion, CompletionRequest, GatewayError};
    use async_trait::async_trait;
    use estate_domain::{
        AgentProfile, Model, ToolCall, ToolDefinition, ToolResult, ToolSpec,
    };
    use std::sync::Mutex;

    /// Gateway that answers per agent name, with optional scripted failures
    struct FakeGateway {
        /// Agents whose calls fail, with how many failures to serve
        failures: Mutex<Vec<(String, u32)>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl FakeGateway {
        fn new() -> Self {
            Self {
                failures: Mutex::new(Vec::new()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(agent: &str, times: u32) -> Self {
            let gateway = Self::new();
            gateway
                .failures
                .lock()
                .unwrap()
                .push((agent.to_string(), times));
            gateway
        }
    }

    #[async_trait]
    impl CompletionGateway for FakeGateway {
        async fn complete(&self, request: CompletionRequest) -> Result<Completion, GatewayError> {
            let system = request.system.clone();
            self.requests.lock().unwrap().push(request);
            let mut failures = self.failures.lock().unwrap();
            if let Some(entry) = failures.iter_mut().find(|(a, n)| system.contains(a.as_str()) && *n > 0) {
                entry.1 -= 1;
                return Err(GatewayError::RequestFailed("scripted failure".into()));
            }
            Ok(Completion::text(format!("answer from [{}]", system)))
        }
    }

    struct EmptyExecutor {
        spec: ToolSpec,
    }

    #[async_trait]
    impl ToolExecutorPort for EmptyExecutor {
        fn tool_spec(&self) -> &ToolSpec {
            &self.spec
        }

        async fn execute(&self, call: &ToolCall) -> ToolResult {
            ToolResult::success(&call.tool_name, serde_json::json!({}))
        }
    }

    fn executor() -> Arc<EmptyExecutor> {
        Arc::new(EmptyExecutor {
            spec: ToolSpec::new().register(ToolDefinition::new("noop", "No-op")),
        })
    }

    fn team() -> TeamProfile {
        TeamProfile::new(
            "InvestmentAnalysis",
            Model::MistralSmall,
            vec![
                AgentProfile::new("RoiAgent", Model::MistralSmall)
                    .with_description("RoiAgent computes returns."),
                AgentProfile::new("RiskAgent", Model::MistralSmall)
                    .with_description("RiskAgent scores risk."),
            ],
        )
        .unwrap()
        .with_instructions("Compute ROI first, then risk.")
    }

    #[tokio::test]
    async fn test_sequential_hand_off() {
        let gateway = Arc::new(FakeGateway::new());
        let use_case = RunTeamUseCase::new(gateway.clone(), executor());

        let report = use_case
            .execute(&team(), RunTeamInput::new("Analyze this deal"), &CancellationToken::new())
            .await
            .unwrap();

        assert!(!report.is_partial());
        assert_eq!(report.members.len(), 2);
        assert!(report.response.contains("RiskAgent"));

        // The second member's prompt carries the first member's notes
        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].prompt.contains("Hand-off notes"));
        assert!(requests[1].prompt.contains("## RoiAgent"));
        assert!(requests[0].prompt.contains("Team briefing"));
    }

    #[tokio::test]
    async fn test_retry_then_success() {
        let gateway = Arc::new(FakeGateway::failing("RoiAgent", 1));
        let use_case = RunTeamUseCase::new(gateway, executor());

        let report = use_case
            .execute(&team(), RunTeamInput::new("Analyze"), &CancellationToken::new())
            .await
            .unwrap();

        assert!(!report.is_partial());
        assert_eq!(report.members[0].attempts, 2);
        assert!(report.members[0].success);
    }

    #[tokio::test]
    async fn test_member_failure_degrades_to_partial() {
        // RiskAgent fails on both attempts
        let gateway = Arc::new(FakeGateway::failing("RiskAgent", 2));
        let use_case = RunTeamUseCase::new(gateway, executor());

        let report = use_case
            .execute(&team(), RunTeamInput::new("Analyze"), &CancellationToken::new())
            .await
            .unwrap();

        assert!(report.is_partial());
        assert_eq!(report.failed_member.as_deref(), Some("RiskAgent"));
        // The first member's work survives and the failed step is named
        assert!(report.response.contains("## RoiAgent"));
        assert!(report.response.contains("step 2 (RiskAgent) did not complete"));
        // Raw gateway errors never surface in the response
        assert!(!report.response.contains("scripted failure"));
    }

    #[tokio::test]
    async fn test_first_member_failure_still_yields_response() {
        let gateway = Arc::new(FakeGateway::failing("RoiAgent", 2));
        let use_case = RunTeamUseCase::new(gateway, executor());

        let report = use_case
            .execute(&team(), RunTeamInput::new("Analyze"), &CancellationToken::new())
            .await
            .unwrap();

        assert!(report.is_partial());
        assert!(!report.response.is_empty());
        assert!(report.response.contains("step 1 (RoiAgent)"));
        // The failing step consumed the run; the second member never ran
        assert_eq!(report.members.len(), 1);
    }

    #[tokio::test]
    async fn test_attachments_rendered_into_request() {
        let gateway = Arc::new(FakeGateway::new());
        let use_case = RunTeamUseCase::new(gateway.clone(), executor());

        let input = RunTeamInput::new("Review the attached contract").with_attachments(vec![
            AttachmentRef::new("contract.txt", "documents/module6/20260830_contract.txt", 4096),
        ]);
        use_case
            .execute(&team(), input, &CancellationToken::new())
            .await
            .unwrap();

        let requests = gateway.requests.lock().unwrap();
        assert!(requests[0].prompt.contains("Attached files:"));
        assert!(requests[0].prompt.contains("contract.txt"));
    }

    #[tokio::test]
    async fn test_cancellation_propagates() {
        let gateway = Arc::new(FakeGateway::new());
        let use_case = RunTeamUseCase::new(gateway, executor());

        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = use_case
            .execute(&team(), RunTeamInput::new("Analyze"), &cancel)
            .await;
        assert!(matches!(result, Err(TeamRunError::Cancelled)));
    }
}
