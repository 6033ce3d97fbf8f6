//! Model value object representing a remote completion endpoint

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available completion models (Value Object)
///
/// An opaque handle to a remote completion endpoint. Agents and teams are
/// bound to one of these at construction; the concrete wire protocol lives
/// behind the gateway port in the application layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    MistralSmall,
    MistralMedium,
    MistralLarge,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::MistralSmall => "mistral-small-latest",
            Model::MistralMedium => "mistral-medium-latest",
            Model::MistralLarge => "mistral-large-latest",
            Model::Custom(s) => s,
        }
    }
}

impl Default for Model {
    /// Returns the default model used by every stock module team
    fn default() -> Self {
        Model::MistralSmall
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s {
            "mistral-small-latest" => Model::MistralSmall,
            "mistral-medium-latest" => Model::MistralMedium,
            "mistral-large-latest" => Model::MistralLarge,
            other => Model::Custom(other.to_string()),
        }
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from(s))
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in [Model::MistralSmall, Model::MistralMedium, Model::MistralLarge] {
            let s = model.to_string();
            let parsed: Model = s.parse().expect("infallible");
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "local-llama-8b".parse().expect("infallible");
        assert_eq!(model, Model::Custom("local-llama-8b".to_string()));
        assert_eq!(model.to_string(), "local-llama-8b");
    }

    #[test]
    fn test_model_default() {
        assert_eq!(Model::default(), Model::MistralSmall);
    }
}
