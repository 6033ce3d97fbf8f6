//! Team run value objects
//!
//! A team run always yields a [`TeamRunReport`]: either the full aggregated
//! response, or a partial response annotated with the step that failed.
//! Raw member failures never escape the team boundary.

use serde::{Deserialize, Serialize};

/// Outcome of a single member agent within a team run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberReport {
    /// Member agent name
    pub agent: String,
    /// Number of attempts made (1 = succeeded first try)
    pub attempts: u32,
    /// Whether the member produced a response
    pub success: bool,
    /// The member's response text (for successful members)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// Failure description (for failed members)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MemberReport {
    pub fn succeeded(agent: impl Into<String>, attempts: u32, response: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            attempts,
            success: true,
            response: Some(response.into()),
            error: None,
        }
    }

    pub fn failed(agent: impl Into<String>, attempts: u32, error: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            attempts,
            success: false,
            response: None,
            error: Some(error.into()),
        }
    }
}

/// Aggregated result of one team run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRunReport {
    /// Team name
    pub team: String,
    /// The aggregated response shown to the user; never empty
    pub response: String,
    /// True when one member failed and the response is degraded
    pub partial: bool,
    /// Name of the member that failed (when `partial`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_member: Option<String>,
    /// Per-member outcomes in hand-off order
    pub members: Vec<MemberReport>,
}

impl TeamRunReport {
    pub fn complete(
        team: impl Into<String>,
        response: impl Into<String>,
        members: Vec<MemberReport>,
    ) -> Self {
        Self {
            team: team.into(),
            response: response.into(),
            partial: false,
            failed_member: None,
            members,
        }
    }

    pub fn partial(
        team: impl Into<String>,
        response: impl Into<String>,
        failed_member: impl Into<String>,
        members: Vec<MemberReport>,
    ) -> Self {
        Self {
            team: team.into(),
            response: response.into(),
            partial: true,
            failed_member: Some(failed_member.into()),
            members,
        }
    }

    pub fn is_partial(&self) -> bool {
        self.partial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_report() {
        let report = TeamRunReport::complete(
            "InvestmentAnalysis",
            "ROI is 5%.",
            vec![MemberReport::succeeded("ROI Calculator Agent", 1, "ROI is 5%.")],
        );
        assert!(!report.is_partial());
        assert!(report.failed_member.is_none());
    }

    #[test]
    fn test_partial_report_names_failed_step() {
        let report = TeamRunReport::partial(
            "InvestmentAnalysis",
            "Risk analysis failed; partial results above.",
            "Risk Analysis Agent",
            vec![
                MemberReport::succeeded("ROI Calculator Agent", 1, "ROI is 5%."),
                MemberReport::failed("Risk Analysis Agent", 2, "model call timed out"),
            ],
        );
        assert!(report.is_partial());
        assert_eq!(report.failed_member.as_deref(), Some("Risk Analysis Agent"));
        assert!(!report.response.is_empty());
    }
}
