//! Cache storage implementations

use super::types::{CacheEntry, CacheKey, CacheStatistics};
use crate::error::{TandemError, TandemResult};
use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

/// Cache storage interface
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Get a cache entry
    async fn get(&self, key: &CacheKey) -> TandemResult<Option<CacheEntry>>;

    /// Set a cache entry
    async fn set(&self, key: &CacheKey, entry: CacheEntry) -> TandemResult<()>;

    /// Remove a cache entry
    async fn remove(&self, key: &CacheKey) -> TandemResult<()>;

    /// Clear all entries
    async fn clear(&self) -> TandemResult<()>;

    /// Get storage statistics
    async fn statistics(&self) -> TandemResult<CacheStatistics>;
}

/// In-memory cache storage using an LRU cache
#[derive(Debug)]
pub struct MemoryStorage {
    cache: Arc<Mutex<LruCache<u64, CacheEntry>>>,
    stats: Arc<Mutex<CacheStatistics>>,
}

impl MemoryStorage {
    /// Create a new memory storage with the given capacity
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity clamped to >= 1");
        Self {
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
            stats: Arc::new(Mutex::new(CacheStatistics::default())),
        }
    }
}

#[async_trait]
impl CacheStorage for MemoryStorage {
    async fn get(&self, key: &CacheKey) -> TandemResult<Option<CacheEntry>> {
        let mut cache = self.cache.lock().await;
        let mut stats = self.stats.lock().await;

        match cache.get(&key.hash).cloned() {
            Some(entry) if entry.is_expired() => {
                cache.pop(&key.hash);
                stats.evictions += 1;
                stats.misses += 1;
                stats.entry_count = cache.len();
                Ok(None)
            }
            Some(entry) => {
                stats.hits += 1;
                Ok(Some(entry))
            }
            None => {
                stats.misses += 1;
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &CacheKey, entry: CacheEntry) -> TandemResult<()> {
        let mut cache = self.cache.lock().await;
        let mut stats = self.stats.lock().await;

        let evicting = cache.len() >= cache.cap().get() && !cache.contains(&key.hash);
        cache.put(key.hash, entry);
        if evicting {
            stats.evictions += 1;
        }
        stats.entry_count = cache.len();

        Ok(())
    }

    async fn remove(&self, key: &CacheKey) -> TandemResult<()> {
        let mut cache = self.cache.lock().await;
        let mut stats = self.stats.lock().await;

        if cache.pop(&key.hash).is_some() {
            stats.entry_count = cache.len();
        }

        Ok(())
    }

    async fn clear(&self) -> TandemResult<()> {
        let mut cache = self.cache.lock().await;
        let mut stats = self.stats.lock().await;

        cache.clear();
        stats.entry_count = 0;

        Ok(())
    }

    async fn statistics(&self) -> TandemResult<CacheStatistics> {
        Ok(self.stats.lock().await.clone())
    }
}

/// Disk-backed cache storage: one JSON file per entry
#[derive(Debug)]
pub struct DiskStorage {
    dir: PathBuf,
    stats: Arc<Mutex<CacheStatistics>>,
}

impl DiskStorage {
    /// Create a new disk storage rooted at `dir`, creating it if needed
    pub fn new(dir: impl AsRef<Path>) -> TandemResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .map_err(|e| TandemError::cache(format!("failed to create cache dir: {}", e)))?;

        Ok(Self {
            dir,
            stats: Arc::new(Mutex::new(CacheStatistics::default())),
        })
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(format!("{}-{:016x}.json", key.namespace, key.hash))
    }
}

#[async_trait]
impl CacheStorage for DiskStorage {
    async fn get(&self, key: &CacheKey) -> TandemResult<Option<CacheEntry>> {
        let path = self.entry_path(key);
        let mut stats = self.stats.lock().await;

        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                stats.misses += 1;
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let entry: CacheEntry = serde_json::from_str(&contents)?;
        if entry.is_expired() {
            drop(stats);
            self.remove(key).await?;
            let mut stats = self.stats.lock().await;
            stats.misses += 1;
            stats.evictions += 1;
            return Ok(None);
        }

        stats.hits += 1;
        Ok(Some(entry))
    }

    async fn set(&self, key: &CacheKey, entry: CacheEntry) -> TandemResult<()> {
        let path = self.entry_path(key);
        let contents = serde_json::to_string(&entry)?;
        fs::write(&path, contents).await?;

        let mut stats = self.stats.lock().await;
        stats.entry_count += 1;
        Ok(())
    }

    async fn remove(&self, key: &CacheKey) -> TandemResult<()> {
        let path = self.entry_path(key);
        match fs::remove_file(&path).await {
            Ok(()) => {
                let mut stats = self.stats.lock().await;
                stats.entry_count = stats.entry_count.saturating_sub(1);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn clear(&self) -> TandemResult<()> {
        let mut dir_entries = fs::read_dir(&self.dir).await?;
        while let Some(dir_entry) = dir_entries.next_entry().await? {
            let path = dir_entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                fs::remove_file(path).await?;
            }
        }

        let mut stats = self.stats.lock().await;
        stats.entry_count = 0;
        Ok(())
    }

    async fn statistics(&self) -> TandemResult<CacheStatistics> {
        Ok(self.stats.lock().await.clone())
    }
}
