//! High-level tandem client

use tandem_core::cache::{CacheConfig, CachedChatModel, CompletionCache};
use tandem_core::config::{self, GenerationParams};
use tandem_core::error::TandemResult;
use tandem_core::llm::{
    ChatClient, ChatCompletion, ChatMessage, CompletionOptions, FallbackChatModel, ModelName,
    DEFAULT_FAST_MODEL, DEFAULT_SMART_MODEL,
};
use tracing::debug;

/// One-stop client: fallback dispatch plus completion caching, with
/// defaults that match typical usage (smart primary, fast backup).
///
/// Construction is eager and front-loads configuration errors; the
/// client holds no mutable state afterwards, so one instance can serve
/// many sequential completions.
pub struct TandemClient {
    model: CachedChatModel<FallbackChatModel<ChatClient>>,
    options: CompletionOptions,
}

impl TandemClient {
    /// Create a client with all defaults
    pub fn new() -> TandemResult<Self> {
        Self::builder().build()
    }

    /// Start configuring a client
    pub fn builder() -> TandemClientBuilder {
        TandemClientBuilder::new()
    }

    /// Run a chat completion and return the generated text.
    ///
    /// Identical requests are served from the cache; uncached requests
    /// show the loading indicator, try the primary model once, and fall
    /// back to the backup once on any failure.
    pub async fn chat_completion(&self, messages: &[ChatMessage]) -> TandemResult<String> {
        self.model.completion(messages, &self.options).await
    }

    /// The logical model used as primary
    pub fn primary_model(&self) -> ModelName {
        self.model.inner().primary().model_name()
    }

    /// The logical model used as backup
    pub fn backup_model(&self) -> ModelName {
        self.model.inner().backup().model_name()
    }
}

/// Builder for [`TandemClient`]
pub struct TandemClientBuilder {
    primary: ModelName,
    backup: ModelName,
    params: GenerationParams,
    cache_config: CacheConfig,
    use_cache: bool,
    loading_text: Option<String>,
}

impl Default for TandemClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TandemClientBuilder {
    /// Create a builder with default model selection
    pub fn new() -> Self {
        Self {
            primary: DEFAULT_SMART_MODEL,
            backup: DEFAULT_FAST_MODEL,
            params: GenerationParams::default(),
            cache_config: CacheConfig::default(),
            use_cache: true,
            loading_text: None,
        }
    }

    /// Choose the primary and backup models
    pub fn with_models(mut self, primary: ModelName, backup: ModelName) -> Self {
        self.primary = primary;
        self.backup = backup;
        self
    }

    /// Set generation parameters applied to both models
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Set cache configuration
    pub fn with_cache_config(mut self, cache_config: CacheConfig) -> Self {
        self.cache_config = cache_config;
        self
    }

    /// Disable response caching entirely
    pub fn without_cache(mut self) -> Self {
        self.use_cache = false;
        self
    }

    /// Set the loading indicator label
    pub fn with_loading_text(mut self, text: impl Into<String>) -> Self {
        self.loading_text = Some(text.into());
        self
    }

    /// Build the client.
    ///
    /// Loads `.env` credentials once per process and resolves both chat
    /// clients eagerly; an invalid configuration fails here.
    pub fn build(self) -> TandemResult<TandemClient> {
        config::load_env();

        let model = FallbackChatModel::new(self.primary, self.backup, self.params)?;
        let cache = CompletionCache::new(self.cache_config)?;

        let mut cached = CachedChatModel::new(model, cache);
        if !self.use_cache {
            cached = cached.with_read_cache(false).with_write_cache(false);
        }

        let mut options = CompletionOptions::new();
        if let Some(text) = self.loading_text {
            options = options.with_loading_text(text);
        }

        debug!(
            primary = %self.primary,
            backup = %self.backup,
            cache = self.use_cache,
            "built tandem client"
        );

        Ok(TandemClient {
            model: cached,
            options,
        })
    }
}
