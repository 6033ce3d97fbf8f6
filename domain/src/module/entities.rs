//! Module domain entities
//!
//! A module is a business-domain grouping (valuation, leads, ...) bound to
//! exactly one team. The registry that maps module ids to teams is the sole
//! integration point a front end uses.

use serde::{Deserialize, Serialize};

/// Identifier of a business module (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ModuleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Display metadata for a module, used by front ends to render the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleMetadata {
    /// Display name (e.g., "Property Valuation")
    pub name: String,
    /// One-line description
    pub description: String,
    /// Emoji icon
    pub icon: String,
    /// Accent color (hex)
    pub color: String,
    /// Label of the owning team (e.g., "Property Valuation Team")
    pub team_label: String,
}

impl ModuleMetadata {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
        team_label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
            color: color.into(),
            team_label: team_label.into(),
        }
    }
}

/// Diagnostic status of a registered module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleStatus {
    /// Whether the module's team is ready to serve requests
    pub available: bool,
    /// Captured construction/lookup failure reason (when unavailable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ModuleStatus {
    pub fn available() -> Self {
        Self {
            available: true,
            error: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            available: false,
            error: Some(reason.into()),
        }
    }
}
