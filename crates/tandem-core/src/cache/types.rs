//! Cache types and data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

/// Cache key for identifying cached entries
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    /// Key namespace (e.g. "completion")
    pub namespace: String,
    /// Unique identifier within the namespace
    pub identifier: String,
    /// Hash of the key for fast comparison and file naming
    pub hash: u64,
}

impl CacheKey {
    /// Create a new cache key
    pub fn new(namespace: impl Into<String>, identifier: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let identifier = identifier.into();

        let mut hasher = DefaultHasher::new();
        namespace.hash(&mut hasher);
        identifier.hash(&mut hasher);
        let hash = hasher.finish();

        Self {
            namespace,
            identifier,
            hash,
        }
    }

    /// Cache key for a completion request: the model configuration
    /// fingerprint plus the hashed message sequence
    pub fn completion(config_fingerprint: u64, messages_hash: u64) -> Self {
        Self::new(
            "completion",
            format!("{}:{}", config_fingerprint, messages_hash),
        )
    }
}

/// Cache entry containing data and expiry metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Cached data
    pub data: serde_json::Value,
    /// When the entry was created
    pub created_at: DateTime<Utc>,
    /// When the entry expires (None means no expiration)
    pub expires_at: Option<DateTime<Utc>>,
    /// Size of the entry in bytes
    pub size_bytes: usize,
}

impl CacheEntry {
    /// Create a new cache entry
    pub fn new(data: serde_json::Value, ttl: Option<Duration>) -> Self {
        let now = Utc::now();
        let expires_at = ttl
            .and_then(|duration| chrono::Duration::from_std(duration).ok())
            .map(|duration| now + duration);
        let size_bytes = data.to_string().len();

        Self {
            data,
            created_at: now,
            expires_at,
            size_bytes,
        }
    }

    /// Check if the entry has expired
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() > expires_at,
            None => false,
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Memory cache capacity (number of entries)
    pub memory_capacity: usize,
    /// Enable disk persistence
    pub enable_disk_cache: bool,
    /// Disk cache directory
    pub disk_cache_dir: String,
    /// Default TTL for entries (None means entries never expire)
    pub default_ttl: Option<Duration>,
    /// Milliseconds of artificial delay `(min, max)` applied on the
    /// cache-miss path before the underlying call. A pass-through pacing
    /// knob for rate limiting; `(0, 0)` disables it.
    pub sleep_range: (u64, u64),
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            memory_capacity: 1000,
            enable_disk_cache: false,
            disk_cache_dir: "cache".to_string(),
            default_ttl: None,
            sleep_range: (0, 0),
        }
    }
}

/// Cache statistics across storage layers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStatistics {
    /// Number of entries currently stored
    pub entry_count: usize,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
}

impl CacheStatistics {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        let total_requests = self.hits + self.misses;
        if total_requests == 0 {
            0.0
        } else {
            self.hits as f64 / total_requests as f64
        }
    }
}

/// Hash helper functions
pub mod hash_utils {
    use crate::llm::messages::ChatMessage;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    /// Generate hash for any hashable type
    pub fn hash_value<T: Hash + ?Sized>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    /// Generate hash for a message sequence
    pub fn hash_messages(messages: &[ChatMessage]) -> u64 {
        let mut hasher = DefaultHasher::new();
        for message in messages {
            message.role.hash(&mut hasher);
            message.content.hash(&mut hasher);
        }
        hasher.finish()
    }
}
