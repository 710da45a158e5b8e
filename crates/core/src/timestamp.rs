//! Millisecond-precision timestamp type
//!
//! Cache expiry is expressed as epoch milliseconds in the data document,
//! so milliseconds are the canonical time unit here.
//!
//! Never expose raw arithmetic. Use explicit constructors:
//!
//! ```
//! use larder_core::Timestamp;
//! use std::time::Duration;
//!
//! let now = Timestamp::now();
//! let later = now.saturating_add(Duration::from_secs(60));
//! assert!(later.is_after(now));
//! ```

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Milliseconds per minute, for TTL conversion.
pub const MILLIS_PER_MINUTE: u64 = 60_000;

/// Millisecond-precision timestamp
///
/// Represents a point in time as milliseconds since Unix epoch. Serializes
/// as a plain JSON number, which is the on-disk form of cache expiries.
///
/// ## Invariants
///
/// - Always non-negative (u64)
/// - Always in milliseconds
/// - Comparable and orderable; zero is the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Unix epoch (1970-01-01 00:00:00 UTC)
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Maximum representable timestamp
    pub const MAX: Timestamp = Timestamp(u64::MAX);

    /// Create a timestamp for the current moment
    ///
    /// Uses system time. Returns epoch (0) if the system clock is before
    /// the Unix epoch (e.g. clock went backwards due to NTP adjustment).
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Timestamp(duration.as_millis() as u64)
    }

    /// Create a timestamp from milliseconds since epoch
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Timestamp(millis)
    }

    /// Create a timestamp from seconds since epoch
    #[inline]
    pub const fn from_secs(secs: u64) -> Self {
        Timestamp(secs.saturating_mul(1_000))
    }

    /// Get milliseconds since Unix epoch
    #[inline]
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Add a duration to this timestamp
    ///
    /// Saturates at `Timestamp::MAX` on overflow.
    pub fn saturating_add(&self, duration: Duration) -> Self {
        Timestamp(self.0.saturating_add(duration.as_millis() as u64))
    }

    /// Add a whole number of minutes, the unit TTLs are denominated in
    pub fn saturating_add_minutes(&self, minutes: u64) -> Self {
        Timestamp(self.0.saturating_add(minutes.saturating_mul(MILLIS_PER_MINUTE)))
    }

    /// Check if this timestamp is before another
    #[inline]
    pub fn is_before(&self, other: Timestamp) -> bool {
        self.0 < other.0
    }

    /// Check if this timestamp is after another
    #[inline]
    pub fn is_after(&self, other: Timestamp) -> bool {
        self.0 > other.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::EPOCH
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format as "seconds.millis" for readability
        let secs = self.0 / 1_000;
        let millis = self.0 % 1_000;
        write!(f, "{}.{:03}", secs, millis)
    }
}

impl From<u64> for Timestamp {
    /// Create from raw milliseconds
    fn from(millis: u64) -> Self {
        Timestamp::from_millis(millis)
    }
}

impl From<Timestamp> for u64 {
    /// Extract raw milliseconds
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_epoch() {
        assert_eq!(Timestamp::EPOCH.as_millis(), 0);
        assert_eq!(Timestamp::default(), Timestamp::EPOCH);
    }

    #[test]
    fn test_timestamp_from_secs() {
        let ts = Timestamp::from_secs(1000);
        assert_eq!(ts.as_millis(), 1_000_000);
    }

    #[test]
    fn test_timestamp_now() {
        let before = Timestamp::now();
        std::thread::sleep(Duration::from_millis(2));
        let after = Timestamp::now();

        assert!(after > before, "Time should advance");
    }

    #[test]
    fn test_timestamp_ordering() {
        let t1 = Timestamp::from_millis(100);
        let t2 = Timestamp::from_millis(200);
        let t3 = Timestamp::from_millis(100);

        assert!(t1 < t2);
        assert_eq!(t1, t3);
        assert!(t1.is_before(t2));
        assert!(t2.is_after(t1));
    }

    #[test]
    fn test_timestamp_saturating_add() {
        let ts = Timestamp::from_millis(1000);
        let added = ts.saturating_add(Duration::from_millis(500));
        assert_eq!(added.as_millis(), 1500);

        // Saturation at MAX
        let max_added = Timestamp::MAX.saturating_add(Duration::from_millis(1));
        assert_eq!(max_added, Timestamp::MAX);
    }

    #[test]
    fn test_timestamp_add_minutes() {
        let ts = Timestamp::from_millis(0);
        assert_eq!(ts.saturating_add_minutes(1).as_millis(), 60_000);
        assert_eq!(ts.saturating_add_minutes(5).as_millis(), 300_000);
    }

    #[test]
    fn test_timestamp_display() {
        let ts = Timestamp::from_millis(1_234_567);
        assert_eq!(format!("{}", ts), "1234.567");
        assert_eq!(format!("{}", Timestamp::EPOCH), "0.000");
    }

    #[test]
    fn test_timestamp_serializes_as_plain_number() {
        let ts = Timestamp::from_millis(1_234_567);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "1234567");

        let restored: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, restored);
    }

    #[test]
    fn test_timestamp_from_u64_round_trip() {
        let ts: Timestamp = 12345u64.into();
        assert_eq!(ts.as_millis(), 12345);
        let millis: u64 = ts.into();
        assert_eq!(millis, 12345);
    }
}
