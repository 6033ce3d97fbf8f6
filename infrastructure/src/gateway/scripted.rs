//! Scripted completion gateway for tests
//!
//! Serves a queued sequence of completions and records every request it
//! received, so integration tests can drive full team runs without a
//! network.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use estate_application::ports::completion_gateway::{
    Completion, CompletionGateway, CompletionRequest, GatewayError,
};

/// Gateway replaying a scripted sequence of outcomes
pub struct ScriptedGateway {
    script: Mutex<VecDeque<Result<Completion, GatewayError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful completion
    pub fn enqueue(self, completion: Completion) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Ok(completion));
        }
        self
    }

    /// Queue a failure
    pub fn enqueue_error(self, error: GatewayError) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Err(error));
        }
        self
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl Default for ScriptedGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionGateway for ScriptedGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GatewayError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        let next = self.script.lock().ok().and_then(|mut script| script.pop_front());
        next.unwrap_or_else(|| Err(GatewayError::RequestFailed("script exhausted".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_domain::Model;

    #[tokio::test]
    async fn test_scripted_sequence_and_recording() {
        let gateway = ScriptedGateway::new()
            .enqueue(Completion::text("first"))
            .enqueue_error(GatewayError::RequestFailed("boom".into()));

        let request = CompletionRequest::new(Model::MistralSmall, "sys", "prompt");
        let first = gateway.complete(request.clone()).await.unwrap();
        assert_eq!(first.text, "first");

        assert!(gateway.complete(request.clone()).await.is_err());
        // Exhausted script keeps failing
        assert!(gateway.complete(request).await.is_err());
        assert_eq!(gateway.requests().len(), 3);
    }
}
