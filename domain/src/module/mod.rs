//! Module bounded context

pub mod entities;

pub use entities::{ModuleId, ModuleMetadata, ModuleStatus};
