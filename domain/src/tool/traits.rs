//! Tool domain traits
//!
//! Pure domain logic for validating tool calls against their definitions.
//! The async executor port lives in the application layer.

use super::entities::{ToolCall, ToolDefinition};
use super::value_objects::ToolError;

/// Validator for tool calls
///
/// Validates a call against its definition without any I/O. Called at the
/// agent boundary before every dispatch, so the model can be handed a typed
/// `INVALID_ARGUMENT` error instead of the tool panicking on bad input.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), ToolError>;
}

/// Default implementation of ToolValidator
///
/// Checks that required parameters are present, that no unknown parameters
/// were supplied, and that every argument has the declared JSON type.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), ToolError> {
        for param in &definition.parameters {
            match call.arguments.get(&param.name) {
                None if param.required && param.default.is_none() => {
                    return Err(ToolError::invalid_argument(format!(
                        "Missing required parameter '{}' for tool '{}'",
                        param.name, definition.name
                    )));
                }
                Some(value) if !value.is_null() && !param.param_type.matches(value) => {
                    return Err(ToolError::invalid_argument(format!(
                        "Parameter '{}' of tool '{}' expects type {}, got {}",
                        param.name,
                        definition.name,
                        param.param_type,
                        json_type_name(value)
                    )));
                }
                _ => {}
            }
        }

        for arg_name in call.arguments.keys() {
            if definition.parameter(arg_name).is_none() {
                return Err(ToolError::invalid_argument(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                )));
            }
        }

        Ok(())
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{ParamType, ToolParameter};

    fn eligibility_definition() -> ToolDefinition {
        ToolDefinition::new("eligibility_checker_engine", "Check loan eligibility")
            .with_parameter(
                ToolParameter::new("monthly_debt", "Monthly debt", true)
                    .with_type(ParamType::Number),
            )
            .with_parameter(
                ToolParameter::new("income", "Monthly income", true).with_type(ParamType::Number),
            )
            .with_parameter(
                ToolParameter::new("credit_score", "Credit score", true)
                    .with_type(ParamType::Integer),
            )
    }

    #[test]
    fn test_validator_missing_required() {
        let validator = DefaultToolValidator;
        let call = ToolCall::new("eligibility_checker_engine").with_arg("income", 25_000);

        let err = validator
            .validate(&call, &eligibility_definition())
            .expect_err("should reject");
        assert_eq!(err.code, "INVALID_ARGUMENT");
        assert!(err.message.contains("monthly_debt"));
    }

    #[test]
    fn test_validator_wrong_type() {
        let validator = DefaultToolValidator;
        let call = ToolCall::new("eligibility_checker_engine")
            .with_arg("monthly_debt", 5_000)
            .with_arg("income", 25_000)
            .with_arg("credit_score", "seven hundred");

        let err = validator
            .validate(&call, &eligibility_definition())
            .expect_err("should reject");
        assert!(err.message.contains("credit_score"));
        assert!(err.message.contains("integer"));
    }

    #[test]
    fn test_validator_unknown_param() {
        let validator = DefaultToolValidator;
        let call = ToolCall::new("eligibility_checker_engine")
            .with_arg("monthly_debt", 5_000)
            .with_arg("income", 25_000)
            .with_arg("credit_score", 700)
            .with_arg("currency", "MAD");

        let err = validator
            .validate(&call, &eligibility_definition())
            .expect_err("should reject");
        assert!(err.message.contains("Unknown parameter 'currency'"));
    }

    #[test]
    fn test_validator_valid_call() {
        let validator = DefaultToolValidator;
        let call = ToolCall::new("eligibility_checker_engine")
            .with_arg("monthly_debt", 5_000)
            .with_arg("income", 25_000)
            .with_arg("credit_score", 700);

        assert!(validator.validate(&call, &eligibility_definition()).is_ok());
    }

    #[test]
    fn test_validator_missing_required_with_default_is_ok() {
        let validator = DefaultToolValidator;
        let definition = ToolDefinition::new("search_properties", "Search").with_parameter(
            ToolParameter::new("max_results", "Cap", true)
                .with_type(ParamType::Integer)
                .with_default(10),
        );

        let call = ToolCall::new("search_properties");
        assert!(validator.validate(&call, &definition).is_ok());
    }
}
