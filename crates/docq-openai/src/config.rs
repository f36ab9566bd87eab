//! OpenAI client configuration

use serde::{Deserialize, Serialize};
use std::env;

use docq_core::{Error, Result};

/// Configuration for the OpenAI-compatible client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub api_url: String,
    pub embedding_model: String,
    pub chat_model: String,
    /// Output dimensionality of `embedding_model`
    pub dimension: usize,
}

impl OpenAiConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            Error::Configuration("OPENAI_API_KEY environment variable not found".to_string())
        })?;

        let api_url =
            env::var("OPENAI_API_URL").unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        Ok(Self::new(api_key).with_api_url(api_url))
    }

    /// Create configuration with an explicit API key and default models
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: "https://api.openai.com/v1".to_string(),
            embedding_model: "text-embedding-ada-002".to_string(),
            chat_model: "gpt-3.5-turbo".to_string(),
            dimension: 1536,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_models() {
        let config = OpenAiConfig::new("test_key".to_string());
        assert_eq!(config.embedding_model, "text-embedding-ada-002");
        assert_eq!(config.chat_model, "gpt-3.5-turbo");
        assert_eq!(config.dimension, 1536);
        assert_eq!(config.api_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_api_url_override() {
        let config = OpenAiConfig::new("test_key".to_string())
            .with_api_url("http://localhost:8080/v1");
        assert_eq!(config.api_url, "http://localhost:8080/v1");
    }
}
