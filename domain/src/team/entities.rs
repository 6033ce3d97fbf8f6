//! Team domain entities

use crate::agent::entities::AgentProfile;
use crate::core::error::DomainError;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// An ordered collection of agents exposing one aggregated run operation
/// (Entity).
///
/// The member order encodes the intended hand-off sequence. The team's
/// `instructions` describe the coordination contract in natural language;
/// the concrete sequencing strategy is owned by the application-layer
/// runner, which guarantees exactly one aggregated response per run.
///
/// Like agents, a team is stateless configuration: constructed once at
/// startup and safely reusable across concurrent requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamProfile {
    /// Team name (e.g., "PropertyValuation")
    pub name: String,
    /// Model used for team-level coordination
    pub model: Model,
    /// One-paragraph summary of what this team produces
    pub description: String,
    /// Natural-language coordination instructions
    pub instructions: String,
    /// Ordered member agents; never empty
    members: Vec<AgentProfile>,
}

impl TeamProfile {
    /// Create a team from its ordered members.
    ///
    /// Returns [`DomainError::EmptyTeam`] when `members` is empty; a team
    /// with no members could never produce a response.
    pub fn new(
        name: impl Into<String>,
        model: Model,
        members: Vec<AgentProfile>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if members.is_empty() {
            return Err(DomainError::EmptyTeam(name));
        }
        Ok(Self {
            name,
            model,
            description: String::new(),
            instructions: String::new(),
            members,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Ordered member agents
    pub fn members(&self) -> &[AgentProfile] {
        &self.members
    }

    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        // Guaranteed false by construction; kept for API symmetry
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_requires_members() {
        let err = TeamProfile::new("PropertyValuation", Model::MistralSmall, vec![])
            .expect_err("empty team must be rejected");
        assert!(matches!(err, DomainError::EmptyTeam(name) if name == "PropertyValuation"));
    }

    #[test]
    fn test_team_member_order_is_preserved() {
        let members = vec![
            AgentProfile::new("Data Collector Agent", Model::MistralSmall),
            AgentProfile::new("Valuation Model Agent", Model::MistralSmall),
            AgentProfile::new("Report Generator Agent", Model::MistralSmall),
        ];
        let team = TeamProfile::new("PropertyValuation", Model::MistralSmall, members)
            .expect("valid team")
            .with_instructions("Collect, value, then report.");

        assert_eq!(
            team.member_names(),
            vec![
                "Data Collector Agent",
                "Valuation Model Agent",
                "Report Generator Agent"
            ]
        );
        assert_eq!(team.len(), 3);
    }
}
