//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

use serde_json::Value;

// == Cache Entry ==
/// A single cached key/value pair with its absolute expiration instant.
///
/// The key is stored alongside the value so an entry evicted from the tail of
/// the recency list can be removed from the key index as well.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The key this entry is stored under
    pub key: String,
    /// The stored value, opaque to the cache
    pub value: Value,
    /// Instant at or after which the entry is logically absent.
    /// None only when `now + ttl` does not fit in an `Instant`.
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry that expires `ttl` after `now`.
    ///
    /// A zero TTL produces an entry that is already expired at `now`.
    pub fn new(key: String, value: Value, ttl: Duration, now: Instant) -> Self {
        Self {
            key,
            value,
            expires_at: deadline(now, ttl),
        }
    }

    // == Refresh ==
    /// Replaces the value and restarts the TTL from `now`.
    pub fn refresh(&mut self, value: Value, ttl: Duration, now: Instant) {
        self.value = value;
        self.expires_at = deadline(now, ttl);
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so
    /// the entry stops being visible the moment its TTL has fully elapsed.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining TTL at `now`, or None if the entry never expires.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the TTL hasn't elapsed
    /// - `None` if the expiration instant overflowed
    pub fn ttl_remaining_at(&self, now: Instant) -> Option<Duration> {
        self.expires_at.map(|expires| expires.saturating_duration_since(now))
    }
}

fn deadline(now: Instant, ttl: Duration) -> Option<Instant> {
    now.checked_add(ttl)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_creation_with_ttl() {
        let now = Instant::now();
        let ttl = Duration::from_secs(60);
        let entry = CacheEntry::new("k".to_string(), json!("test_value"), ttl, now);

        assert_eq!(entry.value, json!("test_value"));
        assert_eq!(entry.expires_at, Some(now + Duration::from_secs(60)));
        assert!(!entry.is_expired_at(now));
    }

    #[test]
    fn test_entry_expiration() {
        let now = Instant::now();
        let entry = CacheEntry::new("k".to_string(), json!(1), Duration::from_millis(5), now);

        assert!(!entry.is_expired_at(now + Duration::from_millis(4)));
        assert!(entry.is_expired_at(now + Duration::from_millis(6)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry::new("k".to_string(), json!(null), Duration::from_secs(1), now);

        // Expired exactly when the TTL has elapsed
        assert!(entry.is_expired_at(now + Duration::from_secs(1)));
    }

    #[test]
    fn test_zero_ttl_is_immediately_expired() {
        let now = Instant::now();
        let entry = CacheEntry::new("k".to_string(), json!("v"), Duration::ZERO, now);

        assert!(entry.is_expired_at(now));
        assert_eq!(entry.ttl_remaining_at(now), Some(Duration::ZERO));
    }

    #[test]
    fn test_overflowing_ttl_never_expires() {
        let now = Instant::now();
        let entry = CacheEntry::new("k".to_string(), json!("v"), Duration::MAX, now);

        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired_at(now + Duration::from_secs(3600)));
        assert!(entry.ttl_remaining_at(now).is_none());
    }

    #[test]
    fn test_ttl_remaining() {
        let now = Instant::now();
        let entry = CacheEntry::new("k".to_string(), json!("v"), Duration::from_secs(10), now);

        let later = now + Duration::from_secs(4);
        assert_eq!(entry.ttl_remaining_at(later), Some(Duration::from_secs(6)));
        assert_eq!(
            entry.ttl_remaining_at(now + Duration::from_secs(11)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_refresh_replaces_value_and_deadline() {
        let now = Instant::now();
        let ttl = Duration::from_millis(1);
        let mut entry = CacheEntry::new("k".to_string(), json!("v1"), ttl, now);

        let later = now + Duration::from_millis(10);
        assert!(entry.is_expired_at(later));

        entry.refresh(json!("v2"), Duration::from_secs(5), later);
        assert_eq!(entry.value, json!("v2"));
        assert!(!entry.is_expired_at(later));
    }
}
