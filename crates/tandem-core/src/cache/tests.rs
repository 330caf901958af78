//! Tests for the cache layers and the cached model wrapper

use super::storage::{CacheStorage, DiskStorage, MemoryStorage};
use super::types::{CacheConfig, CacheEntry, CacheKey};
use super::{CachedChatModel, CompletionCache};
use crate::error::{TandemError, TandemResult};
use crate::llm::dispatch::{ChatCompletion, CompletionOptions};
use crate::llm::messages::ChatMessage;
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Completion source that counts invocations and returns a fixed answer
struct CountingModel {
    calls: AtomicUsize,
    answer: String,
}

impl CountingModel {
    fn new(answer: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            answer: answer.to_string(),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatCompletion for CountingModel {
    fn fingerprint(&self) -> u64 {
        42
    }

    async fn completion(
        &self,
        _messages: &[ChatMessage],
        _options: &CompletionOptions,
    ) -> TandemResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer.clone())
    }
}

/// Completion source that always fails
struct FailingModel {
    calls: AtomicUsize,
}

impl FailingModel {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ChatCompletion for FailingModel {
    fn fingerprint(&self) -> u64 {
        42
    }

    async fn completion(
        &self,
        _messages: &[ChatMessage],
        _options: &CompletionOptions,
    ) -> TandemResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(TandemError::llm("provider unavailable"))
    }
}

fn question() -> Vec<ChatMessage> {
    vec![ChatMessage::user("2+2?")]
}

#[tokio::test]
async fn test_memory_storage_round_trip() {
    let storage = MemoryStorage::new(10);
    let key = CacheKey::new("completion", "a");

    assert!(storage.get(&key).await.unwrap().is_none());

    storage
        .set(&key, CacheEntry::new(json!("4"), None))
        .await
        .unwrap();

    let entry = storage.get(&key).await.unwrap().unwrap();
    assert_eq!(entry.data, json!("4"));

    let stats = storage.statistics().await.unwrap();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[tokio::test]
async fn test_memory_storage_expiry() {
    let storage = MemoryStorage::new(10);
    let key = CacheKey::new("completion", "a");

    storage
        .set(&key, CacheEntry::new(json!("4"), Some(Duration::from_secs(0))))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    assert!(storage.get(&key).await.unwrap().is_none());
    let stats = storage.statistics().await.unwrap();
    assert_eq!(stats.evictions, 1);
}

#[tokio::test]
async fn test_memory_storage_evicts_at_capacity() {
    let storage = MemoryStorage::new(2);

    for id in ["a", "b", "c"] {
        storage
            .set(&CacheKey::new("completion", id), CacheEntry::new(json!(id), None))
            .await
            .unwrap();
    }

    // Oldest entry is evicted, newest two remain.
    assert!(storage
        .get(&CacheKey::new("completion", "a"))
        .await
        .unwrap()
        .is_none());
    assert!(storage
        .get(&CacheKey::new("completion", "c"))
        .await
        .unwrap()
        .is_some());

    let stats = storage.statistics().await.unwrap();
    assert_eq!(stats.entry_count, 2);
    assert_eq!(stats.evictions, 1);
}

#[tokio::test]
async fn test_disk_storage_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let key = CacheKey::new("completion", "a");

    {
        let storage = DiskStorage::new(dir.path()).unwrap();
        storage
            .set(&key, CacheEntry::new(json!("4"), None))
            .await
            .unwrap();
    }

    let reopened = DiskStorage::new(dir.path()).unwrap();
    let entry = reopened.get(&key).await.unwrap().unwrap();
    assert_eq!(entry.data, json!("4"));
}

#[tokio::test]
async fn test_disk_storage_drops_expired_entries() {
    let dir = tempfile::tempdir().unwrap();
    let storage = DiskStorage::new(dir.path()).unwrap();
    let key = CacheKey::new("completion", "a");

    storage
        .set(&key, CacheEntry::new(json!("4"), Some(Duration::from_secs(0))))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    assert!(storage.get(&key).await.unwrap().is_none());
    // The backing file is gone too.
    assert!(storage.get(&key).await.unwrap().is_none());
}

#[tokio::test]
async fn test_completion_cache_promotes_disk_hits_to_memory() {
    let dir = tempfile::tempdir().unwrap();
    let key = CacheKey::completion(42, 7);

    // Seed only the disk layer.
    {
        let disk = DiskStorage::new(dir.path()).unwrap();
        disk.set(&key, CacheEntry::new(json!("4"), None))
            .await
            .unwrap();
    }

    let cache = CompletionCache::new(CacheConfig {
        enable_disk_cache: true,
        disk_cache_dir: dir.path().to_string_lossy().to_string(),
        ..CacheConfig::default()
    })
    .unwrap();

    assert_eq!(cache.get(&key).await.unwrap().as_deref(), Some("4"));
    // Second read is served by the memory layer.
    assert_eq!(cache.get(&key).await.unwrap().as_deref(), Some("4"));
    let stats = cache.statistics().await.unwrap();
    assert!(stats.hits >= 2);
}

#[tokio::test]
async fn test_cached_model_is_idempotent() {
    let cached = CachedChatModel::new(CountingModel::new("4"), CompletionCache::in_memory());
    let options = CompletionOptions::default();

    let first = cached.completion(&question(), &options).await.unwrap();
    let second = cached.completion(&question(), &options).await.unwrap();

    assert_eq!(first, "4");
    assert_eq!(second, "4");
    // Both calls returned the identical text from one underlying invocation.
    assert_eq!(cached.inner().calls(), 1);
}

#[tokio::test]
async fn test_cached_model_distinguishes_messages() {
    let cached = CachedChatModel::new(CountingModel::new("ok"), CompletionCache::in_memory());
    let options = CompletionOptions::default();

    cached.completion(&question(), &options).await.unwrap();
    cached
        .completion(&[ChatMessage::user("3+3?")], &options)
        .await
        .unwrap();

    assert_eq!(cached.inner().calls(), 2);
}

#[tokio::test]
async fn test_errors_are_not_cached() {
    let cached = CachedChatModel::new(FailingModel::new(), CompletionCache::in_memory());
    let options = CompletionOptions::default();

    assert!(cached.completion(&question(), &options).await.is_err());
    assert!(cached.completion(&question(), &options).await.is_err());

    // The failure was retried on the second call, not served from cache.
    assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_read_cache_can_be_disabled() {
    let cached = CachedChatModel::new(CountingModel::new("4"), CompletionCache::in_memory())
        .with_read_cache(false);
    let options = CompletionOptions::default();

    cached.completion(&question(), &options).await.unwrap();
    cached.completion(&question(), &options).await.unwrap();

    assert_eq!(cached.inner().calls(), 2);
}

#[tokio::test]
async fn test_zero_sleep_range_adds_no_delay() {
    let cache = CompletionCache::new(CacheConfig {
        sleep_range: (0, 0),
        ..CacheConfig::default()
    })
    .unwrap();
    let cached = CachedChatModel::new(CountingModel::new("4"), cache);

    let started = std::time::Instant::now();
    cached
        .completion(&question(), &CompletionOptions::default())
        .await
        .unwrap();
    assert!(started.elapsed() < Duration::from_millis(100));
}
