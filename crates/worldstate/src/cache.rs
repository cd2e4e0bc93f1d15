//! Typed cache entries for TTL-gated feed features.
//!
//! Some features (sortie, Varzia) are valid until their own in-game
//! expiry; the client records that expiry alongside the cached value
//! and checks it lazily on the next call. Single-threaded by design:
//! the owning client is accessed through `&mut self`, so no locking.

use orbiter_core::types::EpochSeconds;

/// A cached value plus the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached value.
    pub value: T,
    /// Epoch seconds after which the value is stale. An entry with no
    /// recorded expiry is always stale.
    pub valid_until: Option<EpochSeconds>,
}

impl<T> CacheEntry<T> {
    /// Cache `value` until `valid_until`.
    pub fn new(value: T, valid_until: Option<EpochSeconds>) -> Self {
        Self { value, valid_until }
    }

    /// Whether the entry is still valid at `now`.
    pub fn is_fresh(&self, now: EpochSeconds) -> bool {
        match self.valid_until {
            Some(end) => now < end,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_strictly_before_expiry() {
        let entry = CacheEntry::new("sortie", Some(100));
        assert!(entry.is_fresh(99));
        assert!(!entry.is_fresh(100));
        assert!(!entry.is_fresh(101));
    }

    #[test]
    fn entry_without_expiry_is_always_stale() {
        let entry = CacheEntry::new("sortie", None);
        assert!(!entry.is_fresh(0));
    }
}
