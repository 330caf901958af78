//! Error types for the tandem library
//!
//! A single error enum covers both configuration-time failures (unknown
//! model names, invalid timeouts) and request-time failures (provider
//! errors, cache persistence errors). All variants carry owned strings
//! so errors stay `Clone` across the fallback path.

use thiserror::Error;

/// Result type alias for tandem operations
pub type TandemResult<T> = Result<T, TandemError>;

/// Main error type for the tandem library
#[derive(Error, Debug, Clone)]
pub enum TandemError {
    /// Logical model name outside the supported enumeration.
    ///
    /// This is a configuration/programmer error: it surfaces at parse or
    /// construction time and is never retried or sent through fallback.
    #[error("unsupported model name: '{name}'")]
    UnsupportedModel { name: String },

    /// Configuration related errors
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Invalid caller input (e.g. an empty message sequence)
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Provider call errors, any shape: HTTP status, transport failure,
    /// malformed response body
    #[error("llm error: {message}")]
    Llm {
        message: String,
        provider: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("json error: {message}")]
    Json { message: String },

    /// IO errors from cache persistence
    #[error("io error: {message}")]
    Io { message: String },

    /// Cache errors
    #[error("cache error: {message}")]
    Cache { message: String },
}

impl TandemError {
    /// Create an unsupported-model error
    pub fn unsupported_model(name: impl Into<String>) -> Self {
        Self::UnsupportedModel { name: name.into() }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an LLM error without provider attribution
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            provider: None,
        }
    }

    /// Create an LLM error attributed to a provider
    pub fn llm_with_provider(message: impl Into<String>, provider: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            provider: Some(provider.into()),
        }
    }

    /// Create a cache error
    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for TandemError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for TandemError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TandemError::unsupported_model("gpt-99");
        assert_eq!(err.to_string(), "unsupported model name: 'gpt-99'");

        let err = TandemError::llm_with_provider("429 Too Many Requests", "openai");
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn test_errors_are_cloneable() {
        let err = TandemError::llm("timeout");
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: TandemError = json_err.into();
        assert!(matches!(err, TandemError::Json { .. }));
    }
}
