//! Vector store trait and record types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A chunk persisted in the vector store, keyed deterministically by
/// `{document_id}_chunk_{chunk_index}` so re-ingestion overwrites instead
/// of appending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub id: String,
    pub document_id: String,
    pub chunk_index: usize,
    pub text: String,
    pub embedding: Vec<f32>,
}

/// One retrieval hit, ranked by similarity to the query vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub id: String,
    pub text: String,
    pub score: f32,
}

/// Result of a top-k similarity query.
///
/// An empty `hits` means "no matches" and is a success value; it is never
/// conflated with a lookup failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    pub hits: Vec<RetrievedChunk>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Texts of the hits, in retrieval order
    pub fn texts(&self) -> Vec<String> {
        self.hits.iter().map(|hit| hit.text.clone()).collect()
    }
}

/// Trait for vector stores (e.g., Qdrant, in-memory)
///
/// Collections are created implicitly on first upsert ("get or create").
/// Querying a collection that was never created fails with
/// [`Error::CollectionNotFound`](crate::Error::CollectionNotFound).
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert or overwrite a record keyed by its chunk id
    async fn upsert(&self, collection: &str, record: ChunkRecord) -> Result<()>;

    /// Return the `top_k` records nearest to `vector`, best first
    async fn query(&self, collection: &str, vector: &[f32], top_k: usize) -> Result<SearchResult>;

    /// Number of records in a collection (0 for an absent collection)
    async fn count(&self, collection: &str) -> Result<usize>;
}
