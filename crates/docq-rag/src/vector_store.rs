//! Vector store implementations: Qdrant-backed and local in-memory

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use qdrant_client::Payload;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CountPointsBuilder, CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, VectorParamsBuilder, value::Kind,
};

use docq_core::{ChunkRecord, Error, Result, RetrievedChunk, SearchResult, VectorStore};

/// Cosine similarity; 0.0 for a zero-magnitude operand
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if mag_a == 0.0 || mag_b == 0.0 {
        0.0
    } else {
        dot / (mag_a * mag_b)
    }
}

/// In-memory vector store with named collections and cosine ranking.
///
/// Used when no Qdrant URL is configured, and by the test suite. Upserts
/// overwrite by chunk id, so re-ingesting a document keeps the store
/// bounded.
#[derive(Default)]
pub struct LocalVectorStore {
    collections: RwLock<HashMap<String, Vec<ChunkRecord>>>,
}

impl LocalVectorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStore for LocalVectorStore {
    async fn upsert(&self, collection: &str, record: ChunkRecord) -> Result<()> {
        let mut collections = self.collections.write().await;
        let records = collections.entry(collection.to_string()).or_default();

        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        Ok(())
    }

    async fn query(&self, collection: &str, vector: &[f32], top_k: usize) -> Result<SearchResult> {
        let collections = self.collections.read().await;
        let records = collections
            .get(collection)
            .ok_or_else(|| Error::CollectionNotFound(collection.to_string()))?;

        let mut hits: Vec<RetrievedChunk> = records
            .iter()
            .map(|r| RetrievedChunk {
                id: r.id.clone(),
                text: r.text.clone(),
                score: cosine_similarity(&r.embedding, vector),
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(top_k);

        Ok(SearchResult { hits })
    }

    async fn count(&self, collection: &str) -> Result<usize> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).map_or(0, Vec::len))
    }
}

/// Qdrant-backed vector store.
///
/// Qdrant point ids must be UUIDs or integers, so the deterministic chunk id
/// is mapped to a UUIDv5 of itself; the readable id travels in the payload.
/// Same chunk id, same point id: re-ingestion overwrites.
pub struct QdrantVectorStore {
    client: Qdrant,
    dimension: usize,
}

impl QdrantVectorStore {
    /// Connect to a Qdrant instance
    pub async fn connect(url: &str, dimension: usize) -> Result<Self> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| Error::Network(format!("failed to connect to Qdrant at {}: {}", url, e)))?;

        // Fail at startup, not on the first upsert, if the store is unreachable.
        client
            .health_check()
            .await
            .map_err(|e| Error::Network(format!("Qdrant at {} is unreachable: {}", url, e)))?;

        Ok(Self { client, dimension })
    }

    fn point_id(chunk_id: &str) -> String {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, chunk_id.as_bytes()).to_string()
    }

    /// Get-or-create semantics at the collection level
    async fn ensure_collection(&self, collection: &str) -> Result<()> {
        let exists = self
            .client
            .collection_exists(collection)
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !exists {
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(collection).vectors_config(
                        VectorParamsBuilder::new(self.dimension as u64, Distance::Cosine),
                    ),
                )
                .await
                .map_err(|e| Error::StoreWrite(format!("create collection {}: {}", collection, e)))?;
        }
        Ok(())
    }

    fn payload_str(payload: &HashMap<String, qdrant_client::qdrant::Value>, key: &str) -> String {
        payload
            .get(key)
            .and_then(|value| match &value.kind {
                Some(Kind::StringValue(s)) => Some(s.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
    async fn upsert(&self, collection: &str, record: ChunkRecord) -> Result<()> {
        self.ensure_collection(collection).await?;

        let mut payload = Payload::new();
        payload.insert("chunk_id", record.id.clone());
        payload.insert("document_id", record.document_id.clone());
        payload.insert("chunk_index", record.chunk_index as i64);
        payload.insert("text", record.text.clone());

        let point = PointStruct::new(Self::point_id(&record.id), record.embedding, payload);

        self.client
            .upsert_points(UpsertPointsBuilder::new(collection, vec![point]).wait(true))
            .await
            .map_err(|e| Error::StoreWrite(format!("upsert {}: {}", record.id, e)))?;

        Ok(())
    }

    async fn query(&self, collection: &str, vector: &[f32], top_k: usize) -> Result<SearchResult> {
        let exists = self
            .client
            .collection_exists(collection)
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        if !exists {
            return Err(Error::CollectionNotFound(collection.to_string()));
        }

        let response = self
            .client
            .search_points(
                SearchPointsBuilder::new(collection, vector.to_vec(), top_k as u64)
                    .with_payload(true),
            )
            .await
            .map_err(|e| Error::Network(format!("search in {}: {}", collection, e)))?;

        let hits = response
            .result
            .into_iter()
            .map(|point| RetrievedChunk {
                id: Self::payload_str(&point.payload, "chunk_id"),
                text: Self::payload_str(&point.payload, "text"),
                score: point.score,
            })
            .collect();

        Ok(SearchResult { hits })
    }

    async fn count(&self, collection: &str) -> Result<usize> {
        let exists = self
            .client
            .collection_exists(collection)
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        if !exists {
            return Ok(0);
        }

        let response = self
            .client
            .count(CountPointsBuilder::new(collection).exact(true))
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(response.result.map_or(0, |r| r.count as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docq_core::chunk_id;

    fn record(doc: &str, index: usize, text: &str, embedding: Vec<f32>) -> ChunkRecord {
        ChunkRecord {
            id: chunk_id(doc, index),
            document_id: doc.to_string(),
            chunk_index: index,
            text: text.to_string(),
            embedding,
        }
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[tokio::test]
    async fn test_exact_vector_round_trip_ranks_first() {
        let store = LocalVectorStore::new();
        store
            .upsert("col", record("doc", 0, "apple banana", vec![1.0, 0.0, 0.0]))
            .await
            .unwrap();
        store
            .upsert("col", record("doc", 1, "cherry date", vec![0.0, 1.0, 0.0]))
            .await
            .unwrap();

        let result = store.query("col", &[1.0, 0.0, 0.0], 2).await.unwrap();
        assert_eq!(result.hits[0].id, "doc_chunk_0");
        assert_eq!(result.hits[0].text, "apple banana");
        assert!(result.hits[0].score > result.hits[1].score);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_by_chunk_id() {
        let store = LocalVectorStore::new();
        store
            .upsert("col", record("doc", 0, "old text", vec![1.0, 0.0]))
            .await
            .unwrap();
        store
            .upsert("col", record("doc", 0, "new text", vec![1.0, 0.0]))
            .await
            .unwrap();

        assert_eq!(store.count("col").await.unwrap(), 1);
        let result = store.query("col", &[1.0, 0.0], 1).await.unwrap();
        assert_eq!(result.hits[0].text, "new text");
    }

    #[tokio::test]
    async fn test_query_truncates_to_top_k() {
        let store = LocalVectorStore::new();
        for i in 0..5 {
            store
                .upsert("col", record("doc", i, "text", vec![1.0, i as f32]))
                .await
                .unwrap();
        }
        let result = store.query("col", &[1.0, 0.0], 3).await.unwrap();
        assert_eq!(result.hits.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_collection_is_an_error_not_a_sentinel() {
        let store = LocalVectorStore::new();
        match store.query("nowhere", &[1.0], 3).await {
            Err(Error::CollectionNotFound(name)) => assert_eq!(name, "nowhere"),
            other => panic!("expected CollectionNotFound, got {:?}", other.map(|_| ())),
        }
        assert_eq!(store.count("nowhere").await.unwrap(), 0);
    }

    #[test]
    fn test_point_id_is_deterministic() {
        let a = QdrantVectorStore::point_id("doc_chunk_0");
        let b = QdrantVectorStore::point_id("doc_chunk_0");
        let c = QdrantVectorStore::point_id("doc_chunk_1");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}
