//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::{Handle, LruTracker};
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::{CacheStore, Lookup, SetOutcome};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum accepted request body size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
