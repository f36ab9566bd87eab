//! RAG pipeline for docq
//!
//! This crate provides the chunking, retrieval and context-assembly pipeline:
//! PDF text extraction, the chunker policies, the Qdrant and in-memory vector
//! stores, the document indexer and the RAG engine.

mod chunker;
mod context;
mod engine;
mod extract;
mod indexer;
mod vector_store;

#[cfg(test)]
pub(crate) mod test_util;

pub use chunker::{SplitPolicy, split, split_chars, split_words};
pub use context::{Retrieved, assemble};
pub use engine::DocumentRagEngine;
pub use extract::{document_from_pdf, extract_text};
pub use indexer::ChunkIndexer;
pub use vector_store::{LocalVectorStore, QdrantVectorStore};

// Re-export core types for convenience
pub use docq_core::{
    ChunkRecord, Document, DocumentIndexer, Error, IngestConfig, IngestReport, RagEngine,
    RagQuery, RagResult, Result, RetrievedChunk, SearchResult, VectorStore, chunk_id,
};
