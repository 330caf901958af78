//! Chat client construction and the single-model completion path

use crate::config::{GenerationParams, ProviderConfig};
use crate::error::{TandemError, TandemResult};
use crate::llm::dispatch::{ChatCompletion, CompletionBackend, CompletionOptions};
use crate::llm::messages::{ChatMessage, ChatResponse};
use crate::llm::model_name::ModelName;
use crate::llm::providers::{AnthropicProvider, ChatProvider, OpenAiProvider, Provider, ProviderInstance};
use crate::ui::Spinner;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::{debug, instrument};

/// Chat-completion client bound to one resolved model.
///
/// Construction is eager: the provider instance and its HTTP client are
/// built up front, so an invalid configuration fails here rather than on
/// the first request. The model binding never changes after construction.
///
/// # Examples
///
/// ```no_run
/// use tandem_core::config::GenerationParams;
/// use tandem_core::llm::{ChatClient, ChatMessage, ModelName};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ChatClient::for_model(ModelName::Gpt4, GenerationParams::default())?;
/// let response = client.chat(&[ChatMessage::user("2+2?")]).await?;
/// println!("{}", response.content);
/// # Ok(())
/// # }
/// ```
pub struct ChatClient {
    model: ModelName,
    config: ProviderConfig,
    params: GenerationParams,
    instance: ProviderInstance,
}

impl ChatClient {
    /// Create a client for a model with the provider's default config.
    ///
    /// Credentials come from the environment (`OPENAI_API_KEY`,
    /// `ANTHROPIC_API_KEY`, or the `TANDEM_`-prefixed overrides).
    pub fn for_model(model: ModelName, params: GenerationParams) -> TandemResult<Self> {
        Self::with_config(model, ProviderConfig::for_provider(model.provider()), params)
    }

    /// Create a client with an explicit provider configuration
    pub fn with_config(
        model: ModelName,
        config: ProviderConfig,
        params: GenerationParams,
    ) -> TandemResult<Self> {
        config
            .validate()
            .map_err(|e| TandemError::config(format!("invalid provider config: {}", e)))?;

        let http_client = Client::builder()
            .connect_timeout(config.timeouts.connection_timeout())
            .timeout(config.timeouts.request_timeout())
            .build()
            .map_err(|e| {
                TandemError::llm_with_provider(
                    format!("failed to create http client: {}", e),
                    model.provider().name(),
                )
            })?;

        let instance = match model.provider() {
            Provider::OpenAi => ProviderInstance::OpenAi(OpenAiProvider::new(
                config.clone(),
                model.native_id(),
                params.clone(),
                http_client,
            )),
            Provider::Anthropic => ProviderInstance::Anthropic(AnthropicProvider::new(
                config.clone(),
                model.native_id(),
                params.clone(),
                http_client,
            )),
        };

        debug!(
            model = model.native_id(),
            provider = model.provider().name(),
            "created chat client"
        );

        Ok(Self {
            model,
            config,
            params,
            instance,
        })
    }

    /// The logical model this client is bound to
    pub fn model_name(&self) -> ModelName {
        self.model
    }

    /// The provider-native model identifier
    pub fn model(&self) -> &str {
        self.model.native_id()
    }

    /// The provider serving this client
    pub fn provider(&self) -> Provider {
        self.model.provider()
    }

    /// The provider configuration
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// The generation parameters
    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Send a chat completion request and return the full response
    #[instrument(skip(self, messages), fields(model = %self.model.native_id()))]
    pub async fn chat(&self, messages: &[ChatMessage]) -> TandemResult<ChatResponse> {
        self.instance.chat(messages).await
    }
}

#[async_trait]
impl CompletionBackend for ChatClient {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.model.provider().name().hash(&mut hasher);
        self.model.native_id().hash(&mut hasher);
        // Params are f32-bearing, so hash their canonical JSON form.
        if let Ok(params_json) = serde_json::to_string(&self.params) {
            params_json.hash(&mut hasher);
        }
        hasher.finish()
    }

    async fn chat(&self, messages: &[ChatMessage]) -> TandemResult<ChatResponse> {
        self.instance.chat(messages).await
    }
}

// Single-model form of the completion contract: same spinner scope and
// same return shape as the fallback dispatcher, but any error propagates
// directly to the caller.
#[async_trait]
impl ChatCompletion for ChatClient {
    fn fingerprint(&self) -> u64 {
        CompletionBackend::fingerprint(self)
    }

    async fn completion(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> TandemResult<String> {
        if messages.is_empty() {
            return Err(TandemError::invalid_input(
                "completion requires at least one message",
            ));
        }

        let _spinner = Spinner::start(options.loading_text());
        let response = self.instance.chat(messages).await?;
        Ok(response.content)
    }
}
