//! Provider connection configuration
//!
//! Covers the network-facing settings for a provider endpoint: base URL,
//! API version, custom headers, timeouts, and API key resolution. API
//! keys are resolved from the environment first so credentials never
//! need to live in code or checked-in config.

use crate::llm::providers::Provider;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Timeout configuration for provider requests
///
/// - **Connection timeout**: time allowed to establish a connection
/// - **Request timeout**: time allowed for the complete request/response cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Connection timeout in seconds
    #[serde(default = "TimeoutConfig::default_connection_timeout")]
    pub connection_timeout_secs: u64,
    /// Request timeout in seconds (end-to-end)
    #[serde(default = "TimeoutConfig::default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl TimeoutConfig {
    const fn default_connection_timeout() -> u64 {
        30
    }

    const fn default_request_timeout() -> u64 {
        60
    }

    /// Set connection timeout in seconds
    pub fn with_connection_timeout_secs(mut self, secs: u64) -> Self {
        self.connection_timeout_secs = secs;
        self
    }

    /// Set request timeout in seconds
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Connection timeout as a Duration
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }

    /// Request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the timeout configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.connection_timeout_secs == 0 {
            return Err("connection timeout must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request timeout must be greater than 0".to_string());
        }
        if self.request_timeout_secs < self.connection_timeout_secs {
            return Err("request timeout must not be shorter than connection timeout".to_string());
        }
        Ok(())
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connection_timeout_secs: Self::default_connection_timeout(),
            request_timeout_secs: Self::default_request_timeout(),
        }
    }
}

/// Configuration for a provider endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name ("openai", "anthropic")
    pub name: String,
    /// API version header value (used by Anthropic)
    pub api_version: Option<String>,
    /// API key; environment variables take priority over this field
    pub api_key: Option<String>,
    /// Base URL override
    pub base_url: Option<String>,
    /// Custom HTTP headers to include in requests
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Timeout configuration
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: Provider::OpenAi.name().to_string(),
            api_version: None,
            api_key: None,
            base_url: None,
            headers: HashMap::new(),
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl ProviderConfig {
    /// Create a new provider config by name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Default configuration for a provider, credentials from the environment
    pub fn for_provider(provider: Provider) -> Self {
        let mut config = Self::new(provider.name());
        if provider == Provider::Anthropic {
            config.api_version = Some("2023-06-01".to_string());
        }
        config
    }

    /// Set API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set API version
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Add a custom header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set timeout configuration
    pub fn with_timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// The effective base URL for this provider
    pub fn get_base_url(&self) -> String {
        if let Some(base_url) = &self.base_url {
            base_url.clone()
        } else {
            match self.name.as_str() {
                "openai" => "https://api.openai.com/v1".to_string(),
                "anthropic" => "https://api.anthropic.com".to_string(),
                _ => "http://localhost:8000".to_string(),
            }
        }
    }

    /// The effective API key (environment takes priority over config).
    ///
    /// Priority order:
    /// 1. `TANDEM_<PROVIDER>_API_KEY` environment variable
    /// 2. Standard provider environment variable (`OPENAI_API_KEY`,
    ///    `ANTHROPIC_API_KEY`)
    /// 3. This config's `api_key` field
    pub fn get_api_key(&self) -> Option<String> {
        let provider_upper = self.name.to_uppercase();

        let tandem_env_var = format!("TANDEM_{}_API_KEY", provider_upper);
        if let Ok(key) = std::env::var(&tandem_env_var) {
            if !key.is_empty() {
                return Some(key);
            }
        }

        let standard_env_var = format!("{}_API_KEY", provider_upper);
        if let Ok(key) = std::env::var(&standard_env_var) {
            if !key.is_empty() {
                return Some(key);
            }
        }

        self.api_key.clone().filter(|k| !k.is_empty())
    }

    /// Validate the configuration; called once at client construction
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("provider name must not be empty".to_string());
        }
        self.timeouts.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_defaults() {
        assert_eq!(
            ProviderConfig::new("openai").get_base_url(),
            "https://api.openai.com/v1"
        );
        assert_eq!(
            ProviderConfig::new("anthropic").get_base_url(),
            "https://api.anthropic.com"
        );
    }

    #[test]
    fn test_base_url_override() {
        let config = ProviderConfig::new("openai").with_base_url("http://localhost:8080/v1");
        assert_eq!(config.get_base_url(), "http://localhost:8080/v1");
    }

    #[test]
    fn test_for_provider_sets_anthropic_version() {
        let config = ProviderConfig::for_provider(Provider::Anthropic);
        assert_eq!(config.api_version.as_deref(), Some("2023-06-01"));
        assert!(ProviderConfig::for_provider(Provider::OpenAi)
            .api_version
            .is_none());
    }

    #[test]
    fn test_api_key_env_priority() {
        // Use a provider name no real environment would configure so the
        // standard env var lookup cannot collide with the host environment.
        let config = ProviderConfig::new("tandemtest").with_api_key("from-config");
        assert_eq!(config.get_api_key().as_deref(), Some("from-config"));

        std::env::set_var("TANDEM_TANDEMTEST_API_KEY", "from-env");
        assert_eq!(config.get_api_key().as_deref(), Some("from-env"));
        std::env::remove_var("TANDEM_TANDEMTEST_API_KEY");
    }

    #[test]
    fn test_timeout_validation() {
        assert!(TimeoutConfig::default().validate().is_ok());

        let zero = TimeoutConfig::default().with_request_timeout_secs(0);
        assert!(zero.validate().is_err());

        let inverted = TimeoutConfig::default()
            .with_connection_timeout_secs(120)
            .with_request_timeout_secs(60);
        assert!(inverted.validate().is_err());
    }
}
