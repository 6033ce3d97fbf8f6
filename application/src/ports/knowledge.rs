//! Knowledge index port
//!
//! Agents with a knowledge handle query an index for context documents
//! before calling the model. Index failures degrade the run, they never
//! abort it.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Knowledge index '{0}' not found")]
    IndexNotFound(String),

    #[error("Knowledge query failed: {0}")]
    QueryFailed(String),
}

/// One retrieved document
#[derive(Debug, Clone)]
pub struct Document {
    /// Where the content came from (file path, URL, collection name)
    pub source: String,
    /// Retrieved text
    pub content: String,
}

impl Document {
    pub fn new(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
        }
    }
}

/// Port to a retrieval index
#[async_trait]
pub trait KnowledgeIndex: Send + Sync {
    /// Return up to `max_results` documents relevant to `text`
    async fn query(&self, text: &str, max_results: usize) -> Result<Vec<Document>, KnowledgeError>;
}
