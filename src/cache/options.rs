//! Put Options Module
//!
//! Modifiers applied to an entry after `put` has inserted or relocated it.

use std::time::Duration;

use chrono::TimeDelta;
use tokio::time::Instant;

use crate::cache::CacheEntry;

// == Put Option ==
/// A modifier applied to the entry touched by `put`.
///
/// Options run on both the insert and the repeat-key path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOption {
    /// Expire the entry once `ttl` has elapsed from the moment of the `put`
    Expire(Duration),
}

impl PutOption {
    /// Expires the entry `ttl` after the `put`.
    pub fn expire_after(ttl: Duration) -> Self {
        Self::Expire(ttl)
    }

    /// Applies the option to `entry`, computing deadlines relative to `now`.
    ///
    /// A TTL too large to represent as a deadline leaves the entry without one.
    pub(crate) fn apply<K, V>(&self, entry: &mut CacheEntry<K, V>, now: Instant) {
        match *self {
            Self::Expire(ttl) => entry.expires_at = now.checked_add(ttl),
        }
    }
}

/// Expires the entry after a signed duration.
///
/// Negative durations are clamped to zero, so the entry expires immediately
/// instead of living forever.
pub fn with_expire(ttl: TimeDelta) -> PutOption {
    PutOption::Expire(ttl.to_std().unwrap_or(Duration::ZERO))
}

/// Expires the entry after `secs` seconds; negative values expire immediately.
pub fn with_expire_secs(secs: i64) -> PutOption {
    PutOption::Expire(Duration::from_secs(secs.max(0).unsigned_abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_delta_clamps_to_zero() {
        assert_eq!(
            with_expire(TimeDelta::seconds(-5)),
            PutOption::Expire(Duration::ZERO)
        );
        assert_eq!(with_expire(TimeDelta::zero()), with_expire(TimeDelta::seconds(-5)));
    }

    #[test]
    fn test_positive_delta_is_kept() {
        assert_eq!(
            with_expire(TimeDelta::hours(1)),
            PutOption::Expire(Duration::from_secs(3600))
        );
        assert_eq!(
            with_expire(TimeDelta::milliseconds(250)),
            PutOption::Expire(Duration::from_millis(250))
        );
    }

    #[test]
    fn test_with_expire_secs() {
        assert_eq!(with_expire_secs(-5), PutOption::Expire(Duration::ZERO));
        assert_eq!(with_expire_secs(90), PutOption::Expire(Duration::from_secs(90)));
    }

    #[test]
    fn test_apply_sets_absolute_deadline() {
        let now = Instant::now();
        let mut entry = CacheEntry::new("k", "v");

        PutOption::expire_after(Duration::from_secs(3)).apply(&mut entry, now);

        assert_eq!(entry.expires_at, Some(now + Duration::from_secs(3)));
        assert!(!entry.is_expired_at(now));
    }

    #[test]
    fn test_unrepresentable_ttl_never_expires() {
        let now = Instant::now();
        let mut entry = CacheEntry::new("k", "v");
        entry.expires_at = Some(now);

        PutOption::expire_after(Duration::MAX).apply(&mut entry, now);

        assert_eq!(entry.expires_at, None);
        assert!(!entry.is_expired_at(now + Duration::from_secs(86_400 * 365)));
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let now = Instant::now();
        let mut entry = CacheEntry::new("k", "v");

        with_expire_secs(0).apply(&mut entry, now);

        assert!(entry.is_expired_at(now));
    }
}
