//! Shared Cache Handle
//!
//! Wraps a [`CacheStore`] in a single lock so concurrent callers observe a
//! linearizable sequence of operations.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore, Lookup, SetOutcome};

/// Cloneable, thread-safe handle to one cache instance.
///
/// Every lookup, upsert, delete and sweep holds the write lock for the whole
/// call, since each of them may reorder or remove entries. Snapshots that
/// only read (`stats`, `len`, `keys`) take the read lock.
#[derive(Debug, Clone)]
pub struct SharedCache {
    inner: Arc<RwLock<CacheStore>>,
}

impl SharedCache {
    pub fn new(store: CacheStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Creates an empty cache holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(CacheStore::new(capacity))
    }

    pub async fn lookup(&self, key: &str) -> Lookup {
        self.inner.write().await.lookup(key)
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        self.lookup(key).await.into_value()
    }

    pub async fn set(&self, key: impl Into<String>, value: Value, ttl: Duration) -> SetOutcome {
        self.inner.write().await.set(key.into(), value, ttl)
    }

    pub async fn delete(&self, key: &str) -> bool {
        self.inner.write().await.delete(key)
    }

    pub async fn cleanup_expired(&self) -> usize {
        self.inner.write().await.cleanup_expired()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Keys in MRU → LRU order.
    pub async fn keys(&self) -> Vec<String> {
        self.inner.read().await.keys()
    }

    pub async fn is_consistent(&self) -> bool {
        self.inner.read().await.is_consistent()
    }
}
