//! Tandem SDK
//!
//! High-level entry point for dual-model chat completions. The SDK picks
//! sensible defaults (a smart primary model, a fast backup, an in-memory
//! completion cache) and exposes a single call that returns the
//! completion text:
//!
//! ```no_run
//! use tandem_sdk::{ChatMessage, TandemClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TandemClient::new()?;
//! let answer = client
//!     .chat_completion(&[ChatMessage::user("2+2?")])
//!     .await?;
//! println!("{}", answer);
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::{TandemClient, TandemClientBuilder};

// Re-export commonly used types from core
pub use tandem_core::{
    cache::CacheConfig,
    config::{GenerationParams, ProviderConfig, TimeoutConfig},
    error::{TandemError, TandemResult},
    llm::{ChatMessage, CompletionOptions, MessageRole, ModelName},
};
