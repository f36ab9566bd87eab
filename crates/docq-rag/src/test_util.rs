//! Deterministic fakes for exercising the pipeline without remote services

use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use docq_core::{ChatConfig, ChatMessage, ChatProvider, EmbeddingProvider, Error, Result};

const FAKE_DIMENSION: usize = 64;

/// Hash-based word-feature embedder. Deterministic, so an identical text
/// always maps to an identical vector, and texts sharing words land close
/// under cosine similarity.
pub struct FakeEmbedder;

impl FakeEmbedder {
    pub fn embed_sync(text: &str) -> Vec<f32> {
        let normalized = text.to_lowercase();
        let mut embedding = vec![0.0f32; FAKE_DIMENSION];

        for (pos, word) in normalized.split_whitespace().enumerate() {
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            let hash = hasher.finish();

            let idx = (hash % FAKE_DIMENSION as u64) as usize;
            let weight = 1.0 / (pos as f32 + 1.0);
            embedding[idx] += weight;
        }

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }
        embedding
    }
}

#[async_trait]
impl EmbeddingProvider for FakeEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(Self::embed_sync(text))
    }

    fn dimension(&self) -> usize {
        FAKE_DIMENSION
    }
}

/// Embedder that fails for any text containing a marker word
pub struct FailingEmbedder {
    pub fail_on: String,
}

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.contains(&self.fail_on) {
            return Err(Error::EmbeddingService(format!(
                "injected failure for text containing '{}'",
                self.fail_on
            )));
        }
        Ok(FakeEmbedder::embed_sync(text))
    }

    fn dimension(&self) -> usize {
        FAKE_DIMENSION
    }
}

/// Chat provider that returns a canned reply and records the messages it saw
#[derive(Default)]
pub struct FakeChat {
    pub last_messages: Mutex<Vec<ChatMessage>>,
}

#[async_trait]
impl ChatProvider for FakeChat {
    async fn complete(&self, messages: &[ChatMessage], _config: &ChatConfig) -> Result<String> {
        *self.last_messages.lock().unwrap() = messages.to_vec();
        Ok("grounded reply".to_string())
    }
}
