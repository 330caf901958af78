//! Anthropic provider implementation

use crate::config::{GenerationParams, ProviderConfig};
use crate::error::{TandemError, TandemResult};
use crate::llm::messages::{ChatMessage, ChatResponse, MessageRole};
use crate::llm::parsers::ResponseParser;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use super::provider_trait::ChatProvider;

/// Anthropic provider handler
pub struct AnthropicProvider {
    config: ProviderConfig,
    model: String,
    params: GenerationParams,
    http_client: Client,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider
    pub fn new(
        config: ProviderConfig,
        model: impl Into<String>,
        params: GenerationParams,
        http_client: Client,
    ) -> Self {
        Self {
            config,
            model: model.into(),
            params,
            http_client,
        }
    }

    /// Split out system messages; Anthropic takes them as a top-level field
    fn extract_system_message(messages: &[ChatMessage]) -> (Option<String>, Vec<&ChatMessage>) {
        let mut system_parts = Vec::new();
        let mut conversation = Vec::new();

        for message in messages {
            if message.role == MessageRole::System {
                system_parts.push(message.content.clone());
            } else {
                conversation.push(message);
            }
        }

        let system = if system_parts.is_empty() {
            None
        } else {
            Some(system_parts.join("\n\n"))
        };

        (system, conversation)
    }

    /// Build the messages-API request body
    fn build_request_body(&self, messages: &[ChatMessage]) -> Value {
        let (system_message, conversation) = Self::extract_system_message(messages);

        let mut request_body = json!({
            "model": self.model,
            "messages": conversation
                .iter()
                .map(|m| json!({"role": m.role.as_str(), "content": m.content}))
                .collect::<Vec<Value>>(),
            // max_tokens is required by the messages API
            "max_tokens": self.params.max_tokens.unwrap_or(4096),
        });

        if let Some(system) = system_message {
            request_body["system"] = json!(system);
        }
        // The API rejects requests carrying both temperature and top_p
        if let Some(temperature) = self.params.temperature {
            request_body["temperature"] = json!(temperature);
        } else if let Some(top_p) = self.params.top_p {
            request_body["top_p"] = json!(top_p);
        }
        if let Some(stop) = &self.params.stop {
            request_body["stop_sequences"] = json!(stop);
        }

        request_body
    }
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    #[instrument(skip(self, messages), fields(model = %self.model), level = "debug")]
    async fn chat(&self, messages: &[ChatMessage]) -> TandemResult<ChatResponse> {
        let url = format!("{}/v1/messages", self.config.get_base_url());
        let request_body = self.build_request_body(messages);

        let mut request = self.http_client.post(&url).json(&request_body);

        if let Some(api_key) = self.config.get_api_key() {
            request = request.header("x-api-key", api_key);
        }
        let api_version = self.config.api_version.as_deref().unwrap_or("2023-06-01");
        request = request.header("anthropic-version", api_version);
        for (key, value) in &self.config.headers {
            request = request.header(key, value);
        }

        let response = request.send().await.map_err(|e| {
            TandemError::llm_with_provider(format!("request failed: {}", e), "anthropic")
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TandemError::llm_with_provider(
                format!("api error (status {}): {}", status, error_text),
                "anthropic",
            ));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            TandemError::llm_with_provider(format!("failed to parse response: {}", e), "anthropic")
        })?;

        debug!("received response from anthropic");
        ResponseParser::parse_anthropic(response_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> AnthropicProvider {
        AnthropicProvider::new(
            ProviderConfig::new("anthropic").with_api_key("test-key"),
            "claude-3-5-sonnet-20241022",
            GenerationParams::default(),
            Client::new(),
        )
    }

    #[test]
    fn test_system_message_extraction() {
        let messages = vec![
            ChatMessage::system("Be terse."),
            ChatMessage::user("2+2?"),
            ChatMessage::system("Answer in digits."),
        ];

        let (system, conversation) = AnthropicProvider::extract_system_message(&messages);
        assert_eq!(system.as_deref(), Some("Be terse.\n\nAnswer in digits."));
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation[0].content, "2+2?");
    }

    #[test]
    fn test_request_body_shape() {
        let body = provider().build_request_body(&[
            ChatMessage::system("Be terse."),
            ChatMessage::user("2+2?"),
        ]);

        assert_eq!(body["model"], "claude-3-5-sonnet-20241022");
        assert_eq!(body["system"], "Be terse.");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["max_tokens"], 4096);
    }

    #[test]
    fn test_temperature_excludes_top_p() {
        let provider = AnthropicProvider::new(
            ProviderConfig::new("anthropic"),
            "claude-3-5-sonnet-20241022",
            GenerationParams::empty().with_temperature(0.5).with_top_p(0.9),
            Client::new(),
        );
        let body = provider.build_request_body(&[ChatMessage::user("hi")]);

        assert_eq!(body["temperature"], 0.5);
        assert!(body.get("top_p").is_none());
    }
}
