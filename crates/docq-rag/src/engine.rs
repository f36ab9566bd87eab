//! RAG engine: retrieve, assemble, generate

use async_trait::async_trait;
use std::sync::Arc;

use docq_core::{
    ChatConfig, ChatProvider, EmbeddingProvider, Error, RagEngine, RagQuery, RagResult, Result,
    VectorStore, grounded_messages,
};

use crate::context::{Retrieved, assemble};

/// Document-grounded RAG engine.
///
/// One conversational turn: embed the query, pull the top-k chunks from the
/// store, assemble their texts into one context string and delegate to the
/// chat provider with that context as a leading system message.
pub struct DocumentRagEngine {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    chat: Arc<dyn ChatProvider>,
    collection: String,
    chat_config: ChatConfig,
}

impl DocumentRagEngine {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        chat: Arc<dyn ChatProvider>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            embedder,
            store,
            chat,
            collection: collection.into(),
            chat_config: ChatConfig::default(),
        }
    }

    pub fn with_chat_config(mut self, chat_config: ChatConfig) -> Self {
        self.chat_config = chat_config;
        self
    }
}

#[async_trait]
impl RagEngine for DocumentRagEngine {
    async fn retrieve(&self, query: &RagQuery) -> Result<RagResult> {
        let vector = self.embedder.embed(&query.query).await?;
        let result = self
            .store
            .query(&self.collection, &vector, query.top_k)
            .await?;

        let context = assemble(result.hits.iter().map(Retrieved::from));
        Ok(RagResult {
            hits: result.hits,
            context,
        })
    }

    async fn answer(&self, query: &str) -> Result<String> {
        // Nothing ingested yet is an answerable state, not a turn failure:
        // the reply simply goes out ungrounded.
        let retrieval = match self.retrieve(&RagQuery::new(query)).await {
            Ok(result) => result,
            Err(Error::CollectionNotFound(_)) => RagResult {
                hits: Vec::new(),
                context: String::new(),
            },
            Err(e) => return Err(e),
        };

        let messages = grounded_messages(query, &retrieval.context);
        self.chat.complete(&messages, &self.chat_config).await
    }
}
