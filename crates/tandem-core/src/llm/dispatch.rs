//! Fallback dispatch across a primary and a backup chat client
//!
//! The dispatch policy is deliberately minimal: one attempt against the
//! primary, and on any error one attempt against the backup. There is no
//! retry loop, no backoff, and no inspection of the primary's error; the
//! backup substitutes for every failure shape alike. The traits here keep
//! the policy testable without HTTP, cache, or terminal concerns.

use crate::config::GenerationParams;
use crate::error::{TandemError, TandemResult};
use crate::llm::client::ChatClient;
use crate::llm::messages::{ChatMessage, ChatResponse};
use crate::llm::model_name::ModelName;
use crate::ui::Spinner;
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// Label shown by the loading indicator while a request is in flight
pub const DEFAULT_LOADING_TEXT: &str = "🤔 Thinking... ";

/// Per-call options for a completion request
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    /// Loading indicator label; `None` uses [`DEFAULT_LOADING_TEXT`]
    pub loading_text: Option<String>,
}

impl CompletionOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the loading indicator label
    pub fn with_loading_text(mut self, text: impl Into<String>) -> Self {
        self.loading_text = Some(text.into());
        self
    }

    /// The effective loading indicator label
    pub fn loading_text(&self) -> &str {
        self.loading_text.as_deref().unwrap_or(DEFAULT_LOADING_TEXT)
    }
}

/// A backend that can serve one chat request.
///
/// [`ChatClient`] is the production implementation; tests substitute
/// mocks so the fallback policy is exercised without a network.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Stable identity of the backend configuration, used for cache keying
    fn fingerprint(&self) -> u64;

    /// Send a chat completion request
    async fn chat(&self, messages: &[ChatMessage]) -> TandemResult<ChatResponse>;
}

/// The user-facing completion contract shared by the fallback dispatcher
/// and the single-model client, so the cache wrapper composes over both.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Stable identity of the full configuration, used for cache keying
    fn fingerprint(&self) -> u64;

    /// Run a completion and return the text of the first generated choice
    async fn completion(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> TandemResult<String>;
}

/// Chat model with a primary client and a single-shot backup.
///
/// Both clients are resolved eagerly at construction, so configuration
/// errors surface before any request is attempted, and neither handle is
/// ever reassigned afterwards.
pub struct FallbackChatModel<B: CompletionBackend = ChatClient> {
    primary: B,
    backup: B,
}

impl FallbackChatModel<ChatClient> {
    /// Resolve both model names into clients.
    ///
    /// Fails immediately if either client cannot be constructed; nothing
    /// is retried at this stage.
    pub fn new(
        primary: ModelName,
        backup: ModelName,
        params: GenerationParams,
    ) -> TandemResult<Self> {
        let primary = ChatClient::for_model(primary, params.clone())?;
        let backup = ChatClient::for_model(backup, params)?;
        Ok(Self::from_backends(primary, backup))
    }
}

impl<B: CompletionBackend> FallbackChatModel<B> {
    /// Build a dispatcher from already-constructed backends
    pub fn from_backends(primary: B, backup: B) -> Self {
        Self { primary, backup }
    }

    /// The primary backend
    pub fn primary(&self) -> &B {
        &self.primary
    }

    /// The backup backend
    pub fn backup(&self) -> &B {
        &self.backup
    }
}

#[async_trait]
impl<B: CompletionBackend> ChatCompletion for FallbackChatModel<B> {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.primary.fingerprint().hash(&mut hasher);
        self.backup.fingerprint().hash(&mut hasher);
        hasher.finish()
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

        // Guard releases the indicator on every exit path below.
        let _spinner = Spinner::start(options.loading_text());

        let response = match self.primary.chat(messages).await {
            Ok(response) => response,
            Err(primary_error) => {
                // One substitution, any error shape; the backup's verdict
                // is final and the primary's error goes no further.
                debug!(error = %primary_error, "primary model failed, trying backup");
                self.backup.chat(messages).await?
            }
        };

        Ok(response.content)
    }
}
