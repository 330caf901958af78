//! Provider-specific implementations

pub mod anthropic;
pub mod openai;
pub mod provider_trait;

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;
pub use provider_trait::{ChatProvider, ProviderInstance};

use serde::{Deserialize, Serialize};

/// Supported chat-completion providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI (GPT models)
    OpenAi,
    /// Anthropic (Claude models)
    Anthropic,
}

impl Provider {
    /// Get the provider name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
