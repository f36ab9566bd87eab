//! Embedding provider trait

use async_trait::async_trait;

use crate::Result;

/// Trait for embedding providers
///
/// Implementations wrap a remote embedding service mapping one text unit
/// (a chunk or a query string) to a fixed-length vector. Vectors are never
/// mutated after creation.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text unit
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed several text units, preserving input order.
    ///
    /// The default falls back to one call per text; providers that support
    /// batched input should override it.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// Fixed output dimensionality of this provider
    fn dimension(&self) -> usize;
}
