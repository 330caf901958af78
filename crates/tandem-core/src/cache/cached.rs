//! Cache-aware wrapper over a completion source

use super::types::{hash_utils, CacheKey};
use super::CompletionCache;
use crate::error::TandemResult;
use crate::llm::dispatch::{ChatCompletion, CompletionOptions};
use crate::llm::messages::ChatMessage;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::debug;

/// Wraps any [`ChatCompletion`] with request memoization.
///
/// A cache hit returns the stored text without touching the inner model:
/// no spinner, no provider call. A miss runs the full inner protocol
/// and stores its result. Errors are never cached. Composition happens
/// at the call site:
///
/// ```no_run
/// use tandem_core::cache::{CachedChatModel, CompletionCache};
/// use tandem_core::config::GenerationParams;
/// use tandem_core::llm::{FallbackChatModel, ModelName};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let model = FallbackChatModel::new(
///     ModelName::Gpt4,
///     ModelName::Turbo,
///     GenerationParams::default(),
/// )?;
/// let cached = CachedChatModel::new(model, CompletionCache::in_memory());
/// # Ok(())
/// # }
/// ```
pub struct CachedChatModel<M: ChatCompletion> {
    inner: M,
    cache: CompletionCache,
    enable_read_cache: bool,
    enable_write_cache: bool,
}

impl<M: ChatCompletion> CachedChatModel<M> {
    /// Create a new cached model
    pub fn new(inner: M, cache: CompletionCache) -> Self {
        Self {
            inner,
            cache,
            enable_read_cache: true,
            enable_write_cache: true,
        }
    }

    /// Enable or disable cache reads
    pub fn with_read_cache(mut self, enabled: bool) -> Self {
        self.enable_read_cache = enabled;
        self
    }

    /// Enable or disable cache writes
    pub fn with_write_cache(mut self, enabled: bool) -> Self {
        self.enable_write_cache = enabled;
        self
    }

    /// The wrapped model
    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// The cache
    pub fn cache(&self) -> &CompletionCache {
        &self.cache
    }

    fn cache_key(&self, messages: &[ChatMessage]) -> CacheKey {
        CacheKey::completion(self.inner.fingerprint(), hash_utils::hash_messages(messages))
    }

    /// Artificial delay on the miss path, drawn from the configured
    /// `sleep_range`. Used to pace uncached traffic under rate limits.
    async fn pace_miss(&self) {
        let (min_ms, max_ms) = self.cache.config().sleep_range;
        if min_ms == 0 && max_ms == 0 {
            return;
        }
        let delay_ms = rand::thread_rng().gen_range(min_ms..=max_ms.max(min_ms));
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

#[async_trait]
impl<M: ChatCompletion> ChatCompletion for CachedChatModel<M> {
    fn fingerprint(&self) -> u64 {
        self.inner.fingerprint()
    }

    async fn completion(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> TandemResult<String> {
        let key = self.cache_key(messages);

        if self.enable_read_cache {
            if let Some(completion) = self.cache.get(&key).await? {
                debug!("completion served from cache");
                return Ok(completion);
            }
        }

        self.pace_miss().await;
        let completion = self.inner.completion(messages, options).await?;

        if self.enable_write_cache {
            self.cache.put(&key, &completion).await?;
        }

        Ok(completion)
    }
}
