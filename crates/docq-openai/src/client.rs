//! OpenAI API client implementation

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use docq_core::{ChatConfig, ChatMessage, ChatProvider, EmbeddingProvider, Error, Result};

use crate::config::OpenAiConfig;

/// Client for the OpenAI embeddings and chat-completions endpoints
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: Client,
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl OpenAiClient {
    /// Create a new client from configuration
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = OpenAiConfig::from_env()?;
        Self::new(config)
    }

    fn map_send_error(e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout(e.to_string())
        } else {
            Error::Network(e.to_string())
        }
    }

    async fn check_status(response: reqwest::Response, service: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication(format!(
                "{} request rejected with status {}: {}",
                service, status, body
            )));
        }

        let message = format!("{} request failed with status {}: {}", service, status, body);
        Err(match service {
            "embeddings" => Error::EmbeddingService(message),
            _ => Error::ChatService(message),
        })
    }

    /// One embeddings call for a batch of inputs, vectors returned in input order
    async fn request_embeddings(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>> {
        let request_body = EmbeddingsRequest {
            model: &self.config.embedding_model,
            input: inputs,
        };

        let url = format!("{}/embeddings", self.config.api_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let response = Self::check_status(response, "embeddings").await?;

        let mut parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        if parsed.data.len() != inputs.len() {
            return Err(Error::EmbeddingService(format!(
                "expected {} embeddings, service returned {}",
                inputs.len(),
                parsed.data.len()
            )));
        }

        // The API documents output order by index; sort to be safe.
        parsed.data.sort_by_key(|d| d.index);
        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let inputs = vec![text.to_string()];
        let mut vectors = self.request_embeddings(&inputs).await?;
        vectors
            .pop()
            .ok_or_else(|| Error::EmbeddingService("empty embeddings response".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts).await
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }
}

#[async_trait]
impl ChatProvider for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage], config: &ChatConfig) -> Result<String> {
        let request_body = ChatRequest {
            model: &self.config.chat_model,
            messages,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        };

        let url = format!("{}/chat/completions", self.config.api_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let response = Self::check_status(response, "chat").await?;

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::ChatService("no choices in chat response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docq_core::grounded_messages;

    #[test]
    fn test_chat_request_shape() {
        let messages = grounded_messages("how much is shipping?", "shipping: 5 USD");
        let request = ChatRequest {
            model: "gpt-3.5-turbo",
            messages: &messages,
            max_tokens: 500,
            temperature: 0.1,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["max_tokens"], 500);
    }

    #[test]
    fn test_embeddings_response_ordering() {
        let raw = r#"{"data":[
            {"index":1,"embedding":[0.2]},
            {"index":0,"embedding":[0.1]}
        ]}"#;
        let mut parsed: EmbeddingsResponse = serde_json::from_str(raw).unwrap();
        parsed.data.sort_by_key(|d| d.index);
        assert_eq!(parsed.data[0].embedding, vec![0.1]);
        assert_eq!(parsed.data[1].embedding, vec![0.2]);
    }
}
