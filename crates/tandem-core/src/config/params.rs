//! Generation parameters
//!
//! The model identity is deliberately not part of this struct: it is
//! fixed by the `ModelName` a client is constructed with, so callers
//! cannot smuggle a competing model selection through the options.

use serde::{Deserialize, Serialize};

/// Sampling and length parameters for a completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature (0.0 to 2.0)
    pub temperature: Option<f32>,
    /// Top-p sampling
    pub top_p: Option<f32>,
    /// Stop sequences
    pub stop: Option<Vec<String>>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: Some(4096),
            temperature: Some(0.7),
            top_p: None,
            stop: None,
        }
    }
}

impl GenerationParams {
    /// Create parameters with no fields set
    pub fn empty() -> Self {
        Self {
            max_tokens: None,
            temperature: None,
            top_p: None,
            stop: None,
        }
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set top-p
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set stop sequences
    pub fn with_stop(mut self, stop: Vec<String>) -> Self {
        self.stop = Some(stop);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = GenerationParams::default();
        assert_eq!(params.max_tokens, Some(4096));
        assert_eq!(params.temperature, Some(0.7));
        assert!(params.top_p.is_none());
    }

    #[test]
    fn test_builder() {
        let params = GenerationParams::empty()
            .with_max_tokens(256)
            .with_temperature(0.0)
            .with_stop(vec!["\n".to_string()]);
        assert_eq!(params.max_tokens, Some(256));
        assert_eq!(params.temperature, Some(0.0));
        assert_eq!(params.stop.as_deref(), Some(&["\n".to_string()][..]));
    }
}
