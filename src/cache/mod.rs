//! Cache Module
//!
//! Provides in-process caching with LRU eviction and lazy TTL expiration.

mod entry;
mod list;
mod node;
mod options;
mod shared;
mod store;


// Re-export public types
pub(crate) use entry::CacheEntry;
pub(crate) use list::RecencyList;
pub(crate) use node::NodeId;
pub use options::{with_expire, with_expire_secs, PutOption};
pub use shared::Cache;
pub use store::CacheStore;
