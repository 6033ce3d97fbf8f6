//! Module registry
//!
//! Maps module ids to their teams. Teams are constructed once at bootstrap;
//! construction failures are captured as status instead of aborting, so a
//! broken module degrades to "unavailable with reason" while the rest of
//! the catalog keeps serving.

use std::collections::BTreeMap;
use std::sync::Arc;

use estate_domain::{DomainError, Model, ModuleId, ModuleMetadata, ModuleStatus, TeamProfile};
use tracing::{info, warn};

use super::catalog;

struct ModuleEntry {
    metadata: ModuleMetadata,
    team: Result<Arc<TeamProfile>, DomainError>,
}

/// Registry of business modules and their teams
pub struct ModuleRegistry {
    entries: BTreeMap<ModuleId, ModuleEntry>,
}

impl ModuleRegistry {
    /// Build every cataloged module's team with the given model
    pub fn bootstrap(model: &Model) -> Self {
        let mut entries = BTreeMap::new();
        for (id, metadata) in catalog::catalog() {
            let team = catalog::build_team(&id, model).map(Arc::new);
            match &team {
                Ok(team) => info!(
                    module = %id,
                    team = %team.name,
                    members = team.len(),
                    "Module registered"
                ),
                Err(e) => warn!(module = %id, error = %e, "Module unavailable"),
            }
            entries.insert(id, ModuleEntry { metadata, team });
        }
        Self { entries }
    }

    /// Resolve a module to its team.
    ///
    /// Unknown ids and modules whose team failed to construct both surface
    /// as [`DomainError::ModuleUnavailable`]; this never panics.
    pub fn resolve(&self, id: &ModuleId) -> Result<Arc<TeamProfile>, DomainError> {
        match self.entries.get(id) {
            Some(entry) => entry.team.clone(),
            None => Err(DomainError::module_unavailable(id.as_str(), "unknown module")),
        }
    }

    /// Diagnostic status for a module
    pub fn status(&self, id: &ModuleId) -> ModuleStatus {
        match self.entries.get(id) {
            Some(entry) => match &entry.team {
                Ok(_) => ModuleStatus::available(),
                Err(e) => ModuleStatus::unavailable(e.to_string()),
            },
            None => ModuleStatus::unavailable("unknown module"),
        }
    }

    /// All registered modules with their display metadata, in id order
    pub fn list(&self) -> Vec<(&ModuleId, &ModuleMetadata)> {
        self.entries
            .iter()
            .map(|(id, entry)| (id, &entry.metadata))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ModuleRegistry {
        ModuleRegistry::bootstrap(&Model::MistralSmall)
    }

    #[test]
    fn test_resolve_known_module() {
        let team = registry().resolve(&ModuleId::from("module4")).unwrap();
        assert_eq!(team.name, "InvestmentAnalysis");
        assert_eq!(team.len(), 3);
    }

    #[test]
    fn test_resolve_unknown_module_is_typed_error() {
        let err = registry()
            .resolve(&ModuleId::from("unknown_module"))
            .expect_err("unknown module must not resolve");
        assert!(matches!(err, DomainError::ModuleUnavailable { .. }));
        assert!(err.to_string().contains("unknown_module"));
    }

    #[test]
    fn test_module7_registered_but_unavailable() {
        let registry = registry();

        // Listed in the catalog with metadata
        assert!(registry
            .list()
            .iter()
            .any(|(id, _)| id.as_str() == "module7"));

        // But resolution fails with the captured bootstrap error
        let status = registry.status(&ModuleId::from("module7"));
        assert!(!status.available);
        assert!(status.error.unwrap().contains("no team implementation"));
        assert!(registry.resolve(&ModuleId::from("module7")).is_err());
    }

    #[test]
    fn test_status_of_available_module() {
        let status = registry().status(&ModuleId::from("module1"));
        assert!(status.available);
        assert!(status.error.is_none());
    }

    #[tokio::test]
    async fn test_investment_team_runs_end_to_end() {
        use crate::gateway::ScriptedGateway;
        use crate::tools::ToolRegistry;
        use estate_application::{Completion, RunTeamInput, RunTeamUseCase};
        use estate_domain::ToolCall;
        use std::sync::Arc;
        use tokio_util::sync::CancellationToken;

        let team = registry().resolve(&ModuleId::from("module4")).unwrap();

        // The first member computes one ROI through the real tool registry,
        // the others answer in plain text.
        let gateway = Arc::new(
            ScriptedGateway::new()
                .enqueue(Completion::default().with_tool_calls(vec![
                    ToolCall::new("roi_calculator")
                        .with_arg("property_price", 2_000_000)
                        .with_arg("rental_income", 120_000)
                        .with_arg("expenses", 20_000),
                ]))
                .enqueue(Completion::text("ROI is 5%."))
                .enqueue(Completion::text("Risk looks moderate."))
                .enqueue(Completion::text("Cash flow stays positive.")),
        );
        let use_case =
            RunTeamUseCase::new(gateway, Arc::new(ToolRegistry::with_module_providers()));

        let report = use_case
            .execute(
                &team,
                RunTeamInput::new("Evaluate this deal"),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert!(!report.is_partial());
        assert_eq!(report.members.len(), 3);
        assert_eq!(report.response, "Cash flow stays positive.");
    }

    #[test]
    fn test_list_is_ordered() {
        let registry = registry();
        let ids: Vec<&str> = registry.list().iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["module1", "module2", "module3", "module4", "module5", "module6", "module7"]
        );
    }
}
