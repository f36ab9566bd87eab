//! Error types shared across the docq crates

use thiserror::Error;

/// Result type used throughout docq
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the document Q&A pipeline
///
/// Errors during per-chunk ingestion are caught at the chunk granularity;
/// errors during a conversational turn are caught at the turn granularity.
/// Only startup failures (missing credentials, unreachable store) are fatal.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to read document '{path}': {reason}")]
    DocumentRead { path: String, reason: String },

    #[error("embedding service error: {0}")]
    EmbeddingService(String),

    #[error("chat service error: {0}")]
    ChatService(String),

    #[error("collection '{0}' not found")]
    CollectionNotFound(String),

    #[error("vector store write failed: {0}")]
    StoreWrite(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("authentication error: {0}")]
    Authentication(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether a retry could plausibly succeed without operator intervention.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Network(_)
                | Error::Timeout(_)
                | Error::EmbeddingService(_)
                | Error::ChatService(_)
        )
    }
}
