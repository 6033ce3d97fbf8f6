//! Business module catalog and registry

pub mod catalog;
pub mod registry;

pub use registry::ModuleRegistry;
