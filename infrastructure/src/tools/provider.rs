//! Module tool provider
//!
//! One provider per business module, all sharing the same shape: a static
//! spec plus a synchronous dispatch table. Calls are completed with
//! parameter defaults and validated against the definition before dispatch,
//! so individual tool functions can assume well-typed arguments.

use async_trait::async_trait;
use estate_domain::{
    DefaultToolValidator, ToolCall, ToolProvider, ToolResult, ToolSpec, ToolValidator,
};

/// Tool provider backed by a module's dispatch function
pub struct ModuleToolProvider {
    id: &'static str,
    display_name: &'static str,
    spec: ToolSpec,
    dispatch: fn(&ToolCall) -> ToolResult,
}

impl ModuleToolProvider {
    pub fn new(
        id: &'static str,
        display_name: &'static str,
        spec: ToolSpec,
        dispatch: fn(&ToolCall) -> ToolResult,
    ) -> Self {
        Self {
            id,
            display_name,
            spec,
            dispatch,
        }
    }
}

#[async_trait]
impl ToolProvider for ModuleToolProvider {
    fn id(&self) -> &str {
        self.id
    }

    fn display_name(&self) -> &str {
        self.display_name
    }

    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let Some(definition) = self.spec.get(&call.tool_name) else {
            return ToolResult::failure(
                &call.tool_name,
                estate_domain::ToolError::not_found(&call.tool_name),
            );
        };

        let call = call.clone().with_defaults(definition);
        if let Err(e) = DefaultToolValidator.validate(&call, definition) {
            return ToolResult::failure(&call.tool_name, e);
        }

        (self.dispatch)(&call)
    }
}
