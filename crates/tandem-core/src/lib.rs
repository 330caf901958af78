//! Tandem core library
//!
//! Chat-completion dispatch across LLM providers with a one-shot
//! fallback from a primary model to a backup model, response
//! memoization, and a scoped terminal loading indicator.

pub mod cache;
pub mod config;
pub mod error;
pub mod llm;
pub mod ui;

// Re-export commonly used types
pub use cache::{CacheConfig, CachedChatModel, CompletionCache};
pub use config::{GenerationParams, ProviderConfig, TimeoutConfig};
pub use error::{TandemError, TandemResult};
pub use llm::{
    ChatClient, ChatCompletion, ChatMessage, ChatResponse, CompletionOptions, FallbackChatModel,
    MessageRole, ModelName, Provider, DEFAULT_FAST_MODEL, DEFAULT_SMART_MODEL,
};
pub use ui::Spinner;
