//! LRU/TTL Cache - an in-memory key/value cache server
//!
//! A capacity-bounded cache with least-recently-used eviction and lazy
//! per-entry TTL expiration, served over HTTP.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::{create_router, AppState};
pub use cache::{CacheStore, Lookup, SetOutcome, SharedCache};
pub use config::Config;
pub use error::CacheError;
pub use tasks::spawn_cleanup_task;
