//! Background Tasks Module
//!
//! Contains short-lived tasks the cache launches on its own.
//!
//! # Tasks
//! - TTL Sweep: removes expired cache entries, launched by every read

mod sweep;

pub use sweep::spawn_sweep;
