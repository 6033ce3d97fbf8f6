//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and mapped onto domain types where
//! appropriate.

use std::time::Duration;

use estate_application::ExecutionParams;
use estate_domain::Model;
use serde::{Deserialize, Serialize};

/// Raw gateway configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// Chat-completions endpoint URL
    pub endpoint: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Model name as a string
    pub model: String,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.mistral.ai/v1/chat/completions".to_string(),
            api_key_env: "MISTRAL_API_KEY".to_string(),
            model: Model::default().as_str().to_string(),
        }
    }
}

/// Raw run configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRunConfig {
    /// Timeout in seconds for model and tool calls
    pub timeout_secs: u64,
    /// Attempts per team member before the run degrades to partial
    pub member_attempts: u32,
    /// Tool rounds before an agent is forced to answer
    pub max_tool_rounds: u32,
}

impl Default for FileRunConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            member_attempts: 2,
            max_tool_rounds: 4,
        }
    }
}

/// Raw documents configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDocumentsConfig {
    /// Directory for uploaded attachments
    pub dir: String,
}

impl Default for FileDocumentsConfig {
    fn default() -> Self {
        Self {
            dir: "documents".to_string(),
        }
    }
}

/// Raw transcript configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTranscriptsConfig {
    /// Write JSONL transcripts of each run
    pub enabled: bool,
    /// Directory for transcript files
    pub dir: String,
}

impl Default for FileTranscriptsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: "transcripts".to_string(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Gateway settings
    pub gateway: FileGatewayConfig,
    /// Run settings
    pub run: FileRunConfig,
    /// Documents settings
    pub documents: FileDocumentsConfig,
    /// Transcripts settings
    pub transcripts: FileTranscriptsConfig,
}

impl FileConfig {
    /// Parse the configured model name, falling back to the default model
    pub fn model(&self) -> Model {
        self.gateway.model.parse().unwrap_or_default()
    }

    /// Map run settings onto execution parameters
    pub fn execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_call_timeout(Duration::from_secs(self.run.timeout_secs))
            .with_member_attempts(self.run.member_attempts)
            .with_max_tool_rounds(self.run.max_tool_rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.gateway.api_key_env, "MISTRAL_API_KEY");
        assert_eq!(config.run.timeout_secs, 30);
        assert_eq!(config.run.member_attempts, 2);
        assert!(config.transcripts.enabled);
        assert_eq!(config.model(), Model::default());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[gateway]
model = "mistral-large-latest"

[run]
timeout_secs = 60
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.gateway.model, "mistral-large-latest");
        assert_eq!(config.run.timeout_secs, 60);
        // Untouched sections keep their defaults
        assert_eq!(config.run.member_attempts, 2);
        assert_eq!(config.documents.dir, "documents");
    }

    #[test]
    fn test_unknown_model_falls_back_to_default() {
        let config: FileConfig = toml::from_str("[gateway]\nmodel = \"nonsense\"\n").unwrap();
        assert_eq!(config.model(), Model::default());
    }

    #[test]
    fn test_execution_params_mapping() {
        let config: FileConfig =
            toml::from_str("[run]\ntimeout_secs = 5\nmax_tool_rounds = 2\n").unwrap();
        let params = config.execution_params();
        assert_eq!(params.call_timeout, Duration::from_secs(5));
        assert_eq!(params.max_tool_rounds, 2);
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = FileConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let restored: FileConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(restored.gateway.endpoint, config.gateway.endpoint);
        assert_eq!(restored.run.max_tool_rounds, config.run.max_tool_rounds);
    }
}
