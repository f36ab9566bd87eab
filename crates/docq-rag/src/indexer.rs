//! Document indexer: chunk, embed and upsert

use async_trait::async_trait;
use colored::*;
use futures::{StreamExt, stream};
use std::path::Path;
use std::sync::Arc;

use docq_core::{
    ChunkRecord, Document, DocumentIndexer, EmbeddingProvider, IngestConfig, IngestReport, Result,
    VectorStore, chunk_id,
};

use crate::chunker::{self, SplitPolicy};
use crate::extract;

/// Indexes documents into a vector store: split into chunks, embed each
/// chunk, upsert chunk + vector under its deterministic id.
///
/// Chunk embeddings within one document run with bounded concurrency; the
/// order-preserving buffer keeps chunk ids and upsert order identical to the
/// sequential pipeline. A failing chunk is logged and skipped, never
/// aborting the rest of the document.
pub struct ChunkIndexer {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    collection: String,
    policy: SplitPolicy,
    config: IngestConfig,
}

impl ChunkIndexer {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        collection: impl Into<String>,
    ) -> Self {
        let config = IngestConfig::default();
        Self {
            embedder,
            store,
            collection: collection.into(),
            policy: SplitPolicy::Words {
                max_words: config.max_words,
            },
            config,
        }
    }

    pub fn with_config(mut self, config: IngestConfig) -> Self {
        self.policy = SplitPolicy::Words {
            max_words: config.max_words,
        };
        self.config = config;
        self
    }

    /// Override the default word-boundary policy (e.g. raw char windows)
    pub fn with_policy(mut self, policy: SplitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn record_failure(report: &mut IngestReport, document_id: &str, index: usize, reason: &str) {
        let message = format!("document '{}' chunk {}: {}", document_id, index, reason);
        eprintln!("{} {}", "⚠️".yellow(), message);
        report.chunks_failed += 1;
        report.errors.push(message);
    }
}

#[async_trait]
impl DocumentIndexer for ChunkIndexer {
    async fn index_document(&self, document: Document) -> Result<IngestReport> {
        let chunks = chunker::split(&document.content, self.policy);
        let total = chunks.len();
        let mut report = IngestReport::default();

        let embedded = stream::iter(chunks.into_iter().enumerate())
            .map(|(index, text)| {
                let embedder = Arc::clone(&self.embedder);
                async move {
                    let vector = embedder.embed(&text).await;
                    (index, text, vector)
                }
            })
            .buffered(self.config.concurrency.max(1));
        futures::pin_mut!(embedded);

        while let Some((index, text, vector)) = embedded.next().await {
            let embedding = match vector {
                Ok(embedding) => embedding,
                Err(e) => {
                    Self::record_failure(&mut report, &document.id, index, &e.to_string());
                    continue;
                }
            };

            let record = ChunkRecord {
                id: chunk_id(&document.id, index),
                document_id: document.id.clone(),
                chunk_index: index,
                text,
                embedding,
            };

            match self.store.upsert(&self.collection, record).await {
                Ok(()) => report.chunks_indexed += 1,
                Err(e) => Self::record_failure(&mut report, &document.id, index, &e.to_string()),
            }
        }

        println!(
            "{} Indexed {}/{} chunks from '{}'",
            "✅".green(),
            report.chunks_indexed,
            total,
            document.id
        );
        Ok(report)
    }

    async fn index_documents(&self, documents: Vec<Document>) -> Result<IngestReport> {
        let mut report = IngestReport::default();
        for document in documents {
            report.merge(self.index_document(document).await?);
        }
        Ok(report)
    }

    async fn index_pdf(&self, path: &Path) -> Result<IngestReport> {
        println!("{} Extracting '{}'", "📄".blue(), path.display());
        let document = extract::document_from_pdf(path)?;
        self.index_document(document).await
    }

    async fn stats(&self) -> Result<serde_json::Value> {
        let records = self.store.count(&self.collection).await?;
        Ok(serde_json::json!({
            "collection": self.collection,
            "records": records,
        }))
    }
}
