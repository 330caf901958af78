//! Logical model names and their provider-native identifiers

use crate::error::TandemError;
use crate::llm::providers::Provider;
use serde::{Deserialize, Serialize};

/// Default model for quality-sensitive requests
pub const DEFAULT_SMART_MODEL: ModelName = ModelName::Gpt4;

/// Default model for latency-sensitive requests (and the fallback default)
pub const DEFAULT_FAST_MODEL: ModelName = ModelName::Turbo;

/// Closed enumeration of logical model identifiers.
///
/// Each value maps to exactly one provider and one provider-native model
/// string. Callers pick a `ModelName`; the concrete API identifier is an
/// implementation detail resolved by [`native_id`](ModelName::native_id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelName {
    /// Fast OpenAI chat model
    Turbo,
    /// High-quality OpenAI chat model
    Gpt4,
    /// Anthropic chat model
    Claude,
}

impl ModelName {
    /// All supported model names, in declaration order
    pub const ALL: [ModelName; 3] = [ModelName::Turbo, ModelName::Gpt4, ModelName::Claude];

    /// The provider that serves this model
    pub fn provider(&self) -> Provider {
        match self {
            ModelName::Turbo | ModelName::Gpt4 => Provider::OpenAi,
            ModelName::Claude => Provider::Anthropic,
        }
    }

    /// The provider-native model identifier sent on the wire
    pub fn native_id(&self) -> &'static str {
        match self {
            ModelName::Turbo => "gpt-3.5-turbo",
            ModelName::Gpt4 => "gpt-4",
            ModelName::Claude => "claude-3-5-sonnet-20241022",
        }
    }

    /// The logical name as a string
    pub fn name(&self) -> &'static str {
        match self {
            ModelName::Turbo => "turbo",
            ModelName::Gpt4 => "gpt4",
            ModelName::Claude => "claude",
        }
    }
}

impl std::fmt::Display for ModelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ModelName {
    type Err = TandemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "turbo" | "gpt-3.5-turbo" => Ok(ModelName::Turbo),
            "gpt4" | "gpt-4" => Ok(ModelName::Gpt4),
            "claude" => Ok(ModelName::Claude),
            _ => Err(TandemError::unsupported_model(s)),
        }
    }
}
