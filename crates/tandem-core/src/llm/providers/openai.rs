//! OpenAI provider implementation

use crate::config::{GenerationParams, ProviderConfig};
use crate::error::{TandemError, TandemResult};
use crate::llm::messages::{ChatMessage, ChatResponse};
use crate::llm::parsers::ResponseParser;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use super::provider_trait::ChatProvider;

/// OpenAI provider handler
pub struct OpenAiProvider {
    config: ProviderConfig,
    model: String,
    params: GenerationParams,
    http_client: Client,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
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

    /// Build the chat-completions request body
    fn build_request_body(&self, messages: &[ChatMessage]) -> Value {
        let mut request_body = json!({
            "model": self.model,
            "messages": messages
                .iter()
                .map(|m| json!({"role": m.role.as_str(), "content": m.content}))
                .collect::<Vec<Value>>(),
        });

        if let Some(max_tokens) = self.params.max_tokens {
            request_body["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = self.params.temperature {
            request_body["temperature"] = json!(temperature);
        }
        if let Some(top_p) = self.params.top_p {
            request_body["top_p"] = json!(top_p);
        }
        if let Some(stop) = &self.params.stop {
            request_body["stop"] = json!(stop);
        }

        request_body
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    #[instrument(skip(self, messages), fields(model = %self.model), level = "debug")]
    async fn chat(&self, messages: &[ChatMessage]) -> TandemResult<ChatResponse> {
        let url = format!("{}/chat/completions", self.config.get_base_url());
        let request_body = self.build_request_body(messages);

        let mut request = self.http_client.post(&url).json(&request_body);

        if let Some(api_key) = self.config.get_api_key() {
            request = request.bearer_auth(api_key);
        }
        for (key, value) in &self.config.headers {
            request = request.header(key, value);
        }

        let response = request.send().await.map_err(|e| {
            TandemError::llm_with_provider(format!("request failed: {}", e), "openai")
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TandemError::llm_with_provider(
                format!("api error (status {}): {}", status, error_text),
                "openai",
            ));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            TandemError::llm_with_provider(format!("failed to parse response: {}", e), "openai")
        })?;

        debug!("received response from openai");
        ResponseParser::parse_openai(response_json)
    }
}
