//! Core traits and types for docq
//!
//! This crate defines the fundamental traits and types used across the docq
//! system. It provides capability-facing interfaces for embedding providers,
//! chat providers, vector stores, document indexers and the RAG engine,
//! making the system test-friendly and extensible.

pub mod document;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod rag;
pub mod vector_store;

pub use document::{Document, DocumentIndexer, IngestConfig, IngestReport, chunk_id};
pub use embedding::EmbeddingProvider;
pub use error::{Error, Result};
pub use llm::{ChatConfig, ChatMessage, ChatProvider, Role, grounded_messages};
pub use rag::{RagEngine, RagQuery, RagResult};
pub use vector_store::{ChunkRecord, RetrievedChunk, SearchResult, VectorStore};
