//! Chat provider trait and message types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single message in a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Generation parameters for a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.1,
        }
    }
}

/// Build the message list for a grounded reply.
///
/// The retrieved context rides as a leading system message; it is omitted
/// entirely when there is nothing to ground on, so the model is never fed
/// an empty system turn.
pub fn grounded_messages(prompt: &str, context: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2);
    if !context.is_empty() {
        messages.push(ChatMessage::system(context));
    }
    messages.push(ChatMessage::user(prompt));
    messages
}

/// Trait for chat completion providers
///
/// Implementations wrap a remote chat-completion service. The caller owns
/// message assembly; the provider returns the single text completion.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Request a completion for an ordered message list
    async fn complete(&self, messages: &[ChatMessage], config: &ChatConfig) -> Result<String>;
}
