//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: reaps expired cache entries when `CLEANUP_INTERVAL` is set

mod cleanup;

pub use cleanup::spawn_cleanup_task;
