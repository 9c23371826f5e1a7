//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::{CacheError, Result};

// == Repeat Put Policy ==
/// What a `put` on a key that is already cached does to the stored value.
///
/// Both policies move the entry to the most-recently-used position and keep
/// its deadline unless an option sets a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatPut {
    /// Replace the stored value with the new one
    #[default]
    Overwrite,
    /// Only promote the entry; the new value is dropped
    PromoteOnly,
}

impl FromStr for RepeatPut {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "promote" | "promote_only" | "promote-only" => Ok(Self::PromoteOnly),
            other => Err(CacheError::InvalidConfig(format!(
                "unknown repeat put policy '{}' (expected 'overwrite' or 'promote')",
                other
            ))),
        }
    }
}

impl fmt::Display for RepeatPut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overwrite => f.write_str("overwrite"),
            Self::PromoteOnly => f.write_str("promote"),
        }
    }
}

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache can hold (clamped to at least 1)
    pub capacity: usize,
    /// Behavior of `put` on an existing key
    pub repeat_put: RepeatPut,
    /// Whether `get` promotes the entry to most-recently-used
    pub promote_on_get: bool,
    /// Whether every `get` launches a background sweep of expired entries
    pub sweep_on_get: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Unparsable values fall back to their defaults.
    ///
    /// # Environment Variables
    /// - `LRU_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `LRU_REPEAT_PUT` - `overwrite` or `promote` (default: overwrite)
    /// - `LRU_PROMOTE_ON_GET` - Promote on read (default: false)
    /// - `LRU_SWEEP_ON_GET` - Sweep expired entries on read (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env::var("LRU_CAPACITY")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.capacity)
                .max(1),
            repeat_put: env::var("LRU_REPEAT_PUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.repeat_put),
            promote_on_get: env::var("LRU_PROMOTE_ON_GET")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.promote_on_get),
            sweep_on_get: env::var("LRU_SWEEP_ON_GET")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.sweep_on_get),
        }
    }

    /// Like [`Config::from_env`], but rejects values that do not parse.
    pub fn try_from_env() -> Result<Self> {
        let defaults = Self::default();
        let capacity = match env::var("LRU_CAPACITY") {
            Ok(v) => v
                .trim()
                .parse::<usize>()
                .map_err(|_| CacheError::InvalidConfig(format!("LRU_CAPACITY={}", v)))?,
            Err(_) => defaults.capacity,
        };
        let repeat_put = match env::var("LRU_REPEAT_PUT") {
            Ok(v) => v.parse()?,
            Err(_) => defaults.repeat_put,
        };
        let promote_on_get = strict_bool("LRU_PROMOTE_ON_GET", defaults.promote_on_get)?;
        let sweep_on_get = strict_bool("LRU_SWEEP_ON_GET", defaults.sweep_on_get)?;

        Ok(Self {
            capacity: capacity.max(1),
            repeat_put,
            promote_on_get,
            sweep_on_get,
        })
    }

    /// Returns a default config with the given capacity (clamped to at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1000,
            repeat_put: RepeatPut::Overwrite,
            promote_on_get: false,
            sweep_on_get: true,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn strict_bool(var: &str, default: bool) -> Result<bool> {
    match env::var(var) {
        Ok(v) => parse_bool(&v)
            .ok_or_else(|| CacheError::InvalidConfig(format!("{}={}", var, v))),
        Err(_) => Ok(default),
    }
}
