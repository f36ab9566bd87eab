//! RAG engine trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Result, RetrievedChunk};

/// Query for RAG retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagQuery {
    pub query: String,
    pub top_k: usize,
}

impl RagQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

impl Default for RagQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            top_k: 3,
        }
    }
}

/// Result from RAG retrieval: the ranked hits plus the assembled context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagResult {
    pub hits: Vec<RetrievedChunk>,
    pub context: String,
}

/// Trait for RAG engines
///
/// `answer` is the message-driven turn handler: it takes one user query and
/// returns one grounded reply, independent of how the caller obtained the
/// input (stdin, HTTP request, test harness).
#[async_trait]
pub trait RagEngine: Send + Sync {
    /// Retrieve relevant chunks and assemble their context
    async fn retrieve(&self, query: &RagQuery) -> Result<RagResult>;

    /// Handle one conversational turn: retrieve, ground, generate
    async fn answer(&self, query: &str) -> Result<String>;
}
