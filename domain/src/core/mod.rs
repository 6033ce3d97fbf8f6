//! Core domain types shared across all bounded contexts

pub mod error;
pub mod model;
