//! Shared in-memory TTL cache
//!
//! All OnAir services (stream metadata, artwork, lyrics) store their
//! results in one [`CacheStore`]. Entries are JSON values with an absolute
//! expiry; an expired entry is simply treated as absent on read and
//! overwritten on the next fill. There is no eviction beyond expiry.
//!
//! Keys are content hashes built by [`hash_key`] / [`config_key`]:
//! a service prefix followed by the hex SHA-256 of the keyed content.
//! Keying metadata off the canonical serialization of the full stream
//! configuration means any settings change invalidates the cache without
//! an explicit flush.
//!
//! Concurrent fills for the same key are possible and harmless: writes
//! are idempotent last-write-wins.

use serde::{de::DeserializeOwned, Serialize};
use sha2::{Digest, Sha256};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};
use tokio::sync::RwLock;
use tracing::debug;

// ============================================================================
// Key construction
// ============================================================================

/// Build a cache key from a prefix and string parts
///
/// Parts are joined with a separator before hashing so `("ab", "c")` and
/// `("a", "bc")` produce distinct keys.
pub fn hash_key(prefix: &str, parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    format!("{}{}", prefix, hex::encode(hasher.finalize()))
}

/// Build a cache key from a prefix and a serializable configuration record
///
/// The record is serialized to canonical JSON before hashing. Struct field
/// order is declaration-stable under serde, so the hash is order-stable
/// and only changes when the configuration content changes.
pub fn config_key<T: Serialize>(prefix: &str, config: &T) -> String {
    let canonical = serde_json::to_string(config).unwrap_or_default();
    hash_key(prefix, &[&canonical])
}

// ============================================================================
// CacheStore
// ============================================================================

#[derive(Debug, Clone)]
struct Entry {
    value: serde_json::Value,
    expires_at: SystemTime,
}

impl Entry {
    fn is_expired(&self) -> bool {
        SystemTime::now() >= self.expires_at
    }
}

/// Time-bounded in-memory cache of JSON values
///
/// Cloning is cheap; all clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct CacheStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by key, or `None` if absent or expired
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.is_expired() {
            return None;
        }
        serde_json::from_value(entry.value.clone()).ok()
    }

    /// Store a value with a TTL, replacing any previous entry
    pub async fn put<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                debug!(key, "Failed to serialize cache value: {}", e);
                return;
            }
        };
        let entry = Entry {
            value,
            expires_at: SystemTime::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
    }

    /// Remove every entry whose key starts with `prefix`, returning the count
    pub async fn remove_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - entries.len();
        debug!(prefix, removed, "Purged cache entries");
        removed
    }

    /// Drop all entries
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of stored entries, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
