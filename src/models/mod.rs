//! Data models returned by the cache
//!
//! Owned, serializable views that never expose internal node handles.

pub mod snapshot;

// Re-export commonly used types
pub use snapshot::{EntryView, Snapshot};
