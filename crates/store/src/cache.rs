//! Cache wrapper with TTL support
//!
//! Plain entries and expiring entries share one key namespace, so an
//! expiring value is stored as a `{ "value": ..., "expiry": <epoch ms> }`
//! wrapper object. TTL is a storage concern: the wrapper is applied by
//! `LocalStore::set_with_expiry` and stripped by `get_with_expiry`, and
//! the plain `get` never interprets it.

use larder_core::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A value wrapped with its expiry time
///
/// `deny_unknown_fields` keeps the wrapper shape unambiguous: an ordinary
/// object that merely happens to carry extra fields next to `value` and
/// `expiry` is not mistaken for a cache entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheEntry {
    /// The wrapped value, stored verbatim
    pub value: Value,
    /// Epoch milliseconds after which the value is stale
    pub expiry: Timestamp,
}

impl CacheEntry {
    /// Wrap a value with an explicit expiry timestamp
    pub fn new(value: Value, expiry: Timestamp) -> Self {
        CacheEntry { value, expiry }
    }

    /// Wrap a value expiring `ttl_minutes` after `now`
    pub fn with_ttl_minutes(value: Value, now: Timestamp, ttl_minutes: u64) -> Self {
        CacheEntry {
            value,
            expiry: now.saturating_add_minutes(ttl_minutes),
        }
    }

    /// Whether the entry is stale at the given moment
    ///
    /// An entry expiring exactly at `now` is still fresh; staleness
    /// requires `now` to be strictly past the expiry.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.is_after(self.expiry)
    }
}
