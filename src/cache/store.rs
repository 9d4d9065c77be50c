//! Cache Store Module
//!
//! Main cache engine combining a key index with LRU tracking and TTL expiration.
//!
//! Expired entries are reaped lazily: they keep their slot until a lookup,
//! an upsert on the same key, a delete, an eviction or an explicit
//! [`CacheStore::cleanup_expired`] touches them.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::debug;

use crate::cache::lru::Handle;
use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Lookup Result ==
/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// Live entry found and promoted to most recently used
    Hit {
        value: Value,
        /// Time left before expiry, None if the deadline overflowed
        ttl_remaining: Option<Duration>,
    },
    /// No entry stored under the key
    Miss,
    /// An entry existed but had expired; it has now been removed
    Expired,
}

impl Lookup {
    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit { .. })
    }

    /// Returns the value on a hit, None on a miss or expiration.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Lookup::Hit { value, .. } => Some(value),
            Lookup::Miss | Lookup::Expired => None,
        }
    }
}

// == Set Outcome ==
/// What an upsert did to the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOutcome {
    /// A new entry was created
    Inserted,
    /// An existing entry (live or expired) was overwritten in place
    Updated,
    /// A new entry was created and the least recently used key was evicted
    Evicted(String),
}

// == Cache Store ==
/// Capacity-bounded cache with LRU eviction and per-entry TTL.
///
/// Not synchronized on its own; share it through [`crate::cache::SharedCache`].
#[derive(Debug)]
pub struct CacheStore {
    /// Key to recency-list slot
    index: HashMap<String, Handle>,
    /// Entries, ordered by recency of access
    lru: LruTracker<CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `capacity` entries.
    ///
    /// A capacity of zero is accepted: every insert immediately evicts the
    /// entry it just created.
    pub fn new(capacity: usize) -> Self {
        // Cap the up-front reservation; large capacities grow on demand.
        let reserve = capacity.min(4096);
        Self {
            index: HashMap::with_capacity(reserve),
            lru: LruTracker::with_capacity(reserve),
            stats: CacheStats::new(capacity),
            capacity,
        }
    }

    // == Get ==
    /// Looks up `key`, reaping it if expired.
    pub fn lookup(&mut self, key: &str) -> Lookup {
        self.lookup_at(key, Instant::now())
    }

    /// Looks up `key` as of `now`.
    ///
    /// - absent: [`Lookup::Miss`], nothing changes
    /// - expired: entry removed, [`Lookup::Expired`]
    /// - live: entry promoted to most recently used, [`Lookup::Hit`]
    pub fn lookup_at(&mut self, key: &str, now: Instant) -> Lookup {
        let Some(&handle) = self.index.get(key) else {
            debug!("Cache MISS: key={}", key);
            self.stats.record_miss();
            return Lookup::Miss;
        };

        let hit = self.lru.get(handle).and_then(|entry| {
            if entry.is_expired_at(now) {
                None
            } else {
                Some((entry.value.clone(), entry.ttl_remaining_at(now)))
            }
        });

        match hit {
            Some((value, ttl_remaining)) => {
                debug!("Cache HIT: key={}", key);
                self.lru.touch(handle);
                self.stats.record_hit();
                Lookup::Hit {
                    value,
                    ttl_remaining,
                }
            }
            None => {
                debug!("Cache EXPIRED: key={}", key);
                self.index.remove(key);
                self.lru.remove(handle);
                self.stats.record_miss();
                self.stats.record_expirations(1);
                Lookup::Expired
            }
        }
    }

    /// Returns the value for `key` if it is live, promoting it.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        self.lookup(key).into_value()
    }

    // == Set ==
    /// Stores `value` under `key`, expiring `ttl` from now.
    pub fn set(&mut self, key: String, value: Value, ttl: Duration) -> SetOutcome {
        self.set_at(key, value, ttl, Instant::now())
    }

    /// Stores `value` under `key` as of `now`.
    ///
    /// An existing entry (even an expired one) is overwritten in place and
    /// promoted; this never evicts. A new key is linked as most recently used
    /// and, if that pushes the count over capacity, exactly one entry is
    /// evicted from the tail of the recency order, whatever its expiration.
    pub fn set_at(&mut self, key: String, value: Value, ttl: Duration, now: Instant) -> SetOutcome {
        if let Some(&handle) = self.index.get(&key) {
            if let Some(entry) = self.lru.get_mut(handle) {
                entry.refresh(value, ttl, now);
                self.lru.touch(handle);
                debug!("Cache UPDATE: key={}", key);
                return SetOutcome::Updated;
            }
            self.index.remove(&key);
        }

        debug!("Cache INSERT: key={}", key);
        let handle = self
            .lru
            .push_front(CacheEntry::new(key.clone(), value, ttl, now));
        self.index.insert(key, handle);

        if self.lru.len() > self.capacity {
            if let Some(victim) = self.lru.evict_oldest() {
                debug!("Cache EVICT: key={}", victim.key);
                self.index.remove(&victim.key);
                self.stats.record_eviction();
                return SetOutcome::Evicted(victim.key);
            }
        }

        SetOutcome::Inserted
    }

    // == Delete ==
    /// Removes `key`, live or expired. Returns whether an entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        match self.index.remove(key) {
            Some(handle) => {
                debug!("Cache DELETE: key={}", key);
                self.lru.remove(handle);
                true
            }
            None => {
                debug!("Cache DELETE MISS: key={}", key);
                false
            }
        }
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        self.cleanup_expired_at(Instant::now())
    }

    pub fn cleanup_expired_at(&mut self, now: Instant) -> usize {
        let expired: Vec<Handle> = self
            .lru
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(handle, _)| handle)
            .collect();

        let count = expired.len();
        for handle in expired {
            if let Some(entry) = self.lru.remove(handle) {
                self.index.remove(&entry.key);
            }
        }

        self.stats.record_expirations(count);
        count
    }

    // == Inspection ==
    /// Returns the number of stored entries, expired-but-unreaped included.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns stored keys from most to least recently used, without
    /// promoting anything.
    pub fn keys(&self) -> Vec<String> {
        self.lru.iter().map(|(_, entry)| entry.key.clone()).collect()
    }

    /// Checks that the key index and the recency list describe the same set
    /// of entries, that the list is well linked and that the entry count is
    /// within capacity.
    pub fn is_consistent(&self) -> bool {
        self.lru.is_consistent()
            && self.index.len() == self.lru.len()
            && self.index.len() <= self.capacity
            && self
                .lru
                .iter()
                .all(|(handle, entry)| self.index.get(&entry.key) == Some(&handle))
    }
}
