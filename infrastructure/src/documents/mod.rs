//! Attachment persistence

pub mod store;

pub use store::{DocumentStore, StoreError};
