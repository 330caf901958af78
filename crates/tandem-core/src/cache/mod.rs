//! Completion response caching
//!
//! Memoizes completion text keyed on the resolved model configuration
//! plus the message sequence. A memory LRU layer answers first; an
//! optional disk layer persists entries as JSON files across processes.

pub mod cached;
pub mod storage;
pub mod types;

#[cfg(test)]
mod tests;

pub use cached::CachedChatModel;
pub use storage::{CacheStorage, DiskStorage, MemoryStorage};
pub use types::{CacheConfig, CacheEntry, CacheKey, CacheStatistics};

use crate::error::TandemResult;
use tracing::debug;

/// Completion cache coordinating the memory and disk layers
#[derive(Debug)]
pub struct CompletionCache {
    memory: MemoryStorage,
    disk: Option<DiskStorage>,
    config: CacheConfig,
}

impl CompletionCache {
    /// Create a new completion cache
    pub fn new(config: CacheConfig) -> TandemResult<Self> {
        let memory = MemoryStorage::new(config.memory_capacity);
        let disk = if config.enable_disk_cache {
            Some(DiskStorage::new(&config.disk_cache_dir)?)
        } else {
            None
        };

        Ok(Self {
            memory,
            disk,
            config,
        })
    }

    /// Memory-only cache with default settings
    pub fn in_memory() -> Self {
        Self {
            memory: MemoryStorage::new(CacheConfig::default().memory_capacity),
            disk: None,
            config: CacheConfig::default(),
        }
    }

    /// Look up a cached completion (memory first, then disk)
    pub async fn get(&self, key: &CacheKey) -> TandemResult<Option<String>> {
        if let Some(entry) = self.memory.get(key).await? {
            if let Some(completion) = entry.data.as_str() {
                return Ok(Some(completion.to_string()));
            }
        }

        if let Some(disk) = &self.disk {
            if let Some(entry) = disk.get(key).await? {
                let completion = entry.data.as_str().map(|s| s.to_string());
                // Promote to the memory layer for subsequent lookups.
                self.memory.set(key, entry).await?;
                if let Some(completion) = completion {
                    return Ok(Some(completion));
                }
            }
        }

        Ok(None)
    }

    /// Store a completion under a key
    pub async fn put(&self, key: &CacheKey, completion: &str) -> TandemResult<()> {
        let entry = CacheEntry::new(
            serde_json::Value::String(completion.to_string()),
            self.config.default_ttl,
        );

        self.memory.set(key, entry.clone()).await?;
        if let Some(disk) = &self.disk {
            disk.set(key, entry).await?;
        }

        debug!(namespace = %key.namespace, "stored completion in cache");
        Ok(())
    }

    /// Remove a cached completion
    pub async fn remove(&self, key: &CacheKey) -> TandemResult<()> {
        self.memory.remove(key).await?;
        if let Some(disk) = &self.disk {
            disk.remove(key).await?;
        }
        Ok(())
    }

    /// Clear all entries
    pub async fn clear(&self) -> TandemResult<()> {
        self.memory.clear().await?;
        if let Some(disk) = &self.disk {
            disk.clear().await?;
        }
        Ok(())
    }

    /// Combined statistics across the storage layers
    pub async fn statistics(&self) -> TandemResult<CacheStatistics> {
        let memory = self.memory.statistics().await?;
        let disk = match &self.disk {
            Some(disk) => disk.statistics().await?,
            None => CacheStatistics::default(),
        };

        Ok(CacheStatistics {
            entry_count: memory.entry_count + disk.entry_count,
            hits: memory.hits + disk.hits,
            misses: memory.misses + disk.misses,
            evictions: memory.evictions + disk.evictions,
        })
    }

    /// The cache configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}
