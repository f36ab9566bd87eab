//! OpenAI-compatible client for docq
//!
//! Implements [`EmbeddingProvider`] and [`ChatProvider`] against the OpenAI
//! HTTP API (or any API-compatible endpoint via `OPENAI_API_URL`).

mod client;
mod config;

pub use client::OpenAiClient;
pub use config::OpenAiConfig;

// Re-export core types for convenience
pub use docq_core::{ChatConfig, ChatMessage, ChatProvider, EmbeddingProvider, Error, Result};
