//! Document types and the indexer trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Result;

/// Deterministic composite key for a chunk within a document.
///
/// Stable across re-ingestion of the same document, which is what gives the
/// vector store its idempotent overwrite semantics.
pub fn chunk_id(document_id: &str, chunk_index: usize) -> String {
    format!("{}_chunk_{}", document_id, chunk_index)
}

/// A document to be ingested, identified by a stable name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }
}

/// Outcome of an ingestion pass, at chunk granularity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestReport {
    pub chunks_indexed: usize,
    pub chunks_failed: usize,
    pub errors: Vec<String>,
}

impl IngestReport {
    /// Fold another report into this one (used when ingesting several documents)
    pub fn merge(&mut self, other: IngestReport) {
        self.chunks_indexed += other.chunks_indexed;
        self.chunks_failed += other.chunks_failed;
        self.errors.extend(other.errors);
    }
}

/// Configuration for document ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Upper bound on chunk size, in whole words
    pub max_words: usize,
    /// Bounded concurrency for embedding the chunks of one document
    pub concurrency: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_words: 100,
            concurrency: 4,
        }
    }
}

/// Trait for document indexers
///
/// Indexers chunk a document, embed each chunk and upsert chunk + vector
/// into the store. A single bad chunk never aborts the rest of a document.
#[async_trait]
pub trait DocumentIndexer: Send + Sync {
    /// Index one document
    async fn index_document(&self, document: Document) -> Result<IngestReport>;

    /// Index several documents in input order
    async fn index_documents(&self, documents: Vec<Document>) -> Result<IngestReport>;

    /// Extract text from a PDF on disk and index it
    async fn index_pdf(&self, path: &Path) -> Result<IngestReport>;

    /// Indexing statistics
    async fn stats(&self) -> Result<serde_json::Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_id_scheme() {
        assert_eq!(chunk_id("encomiendas", 0), "encomiendas_chunk_0");
        assert_eq!(chunk_id("doc", 12), "doc_chunk_12");
    }

    #[test]
    fn test_report_merge() {
        let mut report = IngestReport {
            chunks_indexed: 2,
            chunks_failed: 1,
            errors: vec!["doc chunk 1: boom".to_string()],
        };
        report.merge(IngestReport {
            chunks_indexed: 3,
            chunks_failed: 0,
            errors: vec![],
        });
        assert_eq!(report.chunks_indexed, 5);
        assert_eq!(report.chunks_failed, 1);
        assert_eq!(report.errors.len(), 1);
    }
}
