//! Tool bounded context
//!
//! Tools are pure, stateless functions with a declared name, description and
//! typed parameter schema. They are created at process start and immutable
//! thereafter; names are unique across the registry they are mounted in.

pub mod entities;
pub mod provider;
pub mod traits;
pub mod value_objects;

pub use entities::{ParamType, ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use provider::ToolProvider;
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult};
