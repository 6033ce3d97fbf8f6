//! HTTP completion gateway
//!
//! Adapter for an OpenAI-style chat-completions endpoint (the Mistral API
//! by default). Tool definitions are serialized as JSON-schema function
//! declarations; tool calls in the response are decoded back into domain
//! [`ToolCall`]s.

use async_trait::async_trait;
use estate_application::ports::completion_gateway::{
    Completion, CompletionGateway, CompletionRequest, GatewayError,
};
use estate_domain::{ToolCall, ToolDefinition};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

/// Gateway speaking the chat-completions wire format over HTTPS
pub struct HttpCompletionGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpCompletionGateway {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Build the JSON request body for one completion request
    fn request_body(request: &CompletionRequest) -> Value {
        let mut body = json!({
            "model": request.model.as_str(),
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.prompt},
            ],
        });
        if !request.tools.is_empty() {
            let tools: Vec<Value> = request.tools.iter().map(tool_schema).collect();
            body["tools"] = json!(tools);
            body["tool_choice"] = json!("auto");
        }
        body
    }

    /// Decode the wire response into a [`Completion`]
    fn parse_completion(response: ChatResponse) -> Result<Completion, GatewayError> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::MalformedCompletion("response has no choices".into()))?;

        let mut tool_calls = Vec::new();
        for api_call in choice.message.tool_calls {
            let arguments: serde_json::Map<String, Value> =
                serde_json::from_str(&api_call.function.arguments).map_err(|e| {
                    GatewayError::MalformedCompletion(format!(
                        "tool call '{}' has unparseable arguments: {}",
                        api_call.function.name, e
                    ))
                })?;
            let mut call = ToolCall::new(api_call.function.name);
            call.arguments = arguments.into_iter().collect();
            tool_calls.push(call);
        }

        Ok(Completion {
            text: choice.message.content.unwrap_or_default(),
            tool_calls,
        })
    }
}

/// JSON-schema function declaration for one tool
fn tool_schema(tool: &ToolDefinition) -> Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();
    for param in &tool.parameters {
        properties.insert(
            param.name.clone(),
            json!({
                "type": param.param_type.as_str(),
                "description": param.description,
            }),
        );
        if param.required {
            required.push(param.name.clone());
        }
    }

    json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            },
        },
    })
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ApiToolCall>,
}

#[derive(Debug, Deserialize)]
struct ApiToolCall {
    function: ApiFunction,
}

#[derive(Debug, Deserialize)]
struct ApiFunction {
    name: String,
    arguments: String,
}

#[async_trait]
impl CompletionGateway for HttpCompletionGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GatewayError> {
        let body = Self::request_body(&request);
        debug!(model = request.model.as_str(), tools = request.tools.len(), "Completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout(e.to_string())
                } else {
                    GatewayError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(GatewayError::ModelNotAvailable(format!(
                    "{}: {}",
                    request.model.as_str(),
                    detail
                )));
            }
            return Err(GatewayError::RequestFailed(format!(
                "endpoint returned {}: {}",
                status, detail
            )));
        }

        let decoded: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedCompletion(e.to_string()))?;
        Self::parse_completion(decoded)
    }
}
