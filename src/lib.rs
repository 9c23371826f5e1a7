//! Mini LRU - A fixed-capacity in-process cache
//!
//! Provides least-recently-used eviction with optional per-entry TTL
//! expiration, safe to share across threads and tasks.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use cache::{with_expire, with_expire_secs, Cache, CacheStore, PutOption};
pub use config::{Config, RepeatPut};
pub use error::{CacheError, Result};
pub use models::{EntryView, Snapshot};
