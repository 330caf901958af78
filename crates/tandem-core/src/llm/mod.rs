//! Chat clients, model names, and fallback dispatch

pub mod client;
pub mod dispatch;
pub mod messages;
pub mod model_name;
pub mod parsers;
pub mod providers;

#[cfg(test)]
mod dispatch_tests;

pub use client::ChatClient;
pub use dispatch::{
    ChatCompletion, CompletionBackend, CompletionOptions, FallbackChatModel, DEFAULT_LOADING_TEXT,
};
pub use messages::{ChatMessage, ChatResponse, MessageRole, Usage};
pub use model_name::{ModelName, DEFAULT_FAST_MODEL, DEFAULT_SMART_MODEL};
pub use providers::Provider;
