//! Provider trait and unified enum

use crate::error::TandemResult;
use crate::llm::messages::{ChatMessage, ChatResponse};
use async_trait::async_trait;

/// Unified trait for provider implementations
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a chat completion request
    async fn chat(&self, messages: &[ChatMessage]) -> TandemResult<ChatResponse>;
}

/// Unified provider enum that wraps all provider implementations
pub enum ProviderInstance {
    OpenAi(super::OpenAiProvider),
    Anthropic(super::AnthropicProvider),
}

#[async_trait]
impl ChatProvider for ProviderInstance {
    async fn chat(&self, messages: &[ChatMessage]) -> TandemResult<ChatResponse> {
        match self {
            Self::OpenAi(p) => p.chat(messages).await,
            Self::Anthropic(p) => p.chat(messages).await,
        }
    }
}
