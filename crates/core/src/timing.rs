//! Nanosecond timestamps
//!
//! A [`Timestamp`] is a plain `u64` of nanoseconds since the Unix epoch.
//! Calendar conversion takes the UTC offset explicitly instead of reading a
//! process-wide setting.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Offset used by venues quoting in KST
pub const DEFAULT_OFFSET_HOURS: i32 = 9;

const NANOS_PER_SEC: u64 = 1_000_000_000;
const CALENDAR_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f %:z";

/// High-precision timestamp type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp {
    /// Nanoseconds since Unix epoch
    pub nanos: u64,
}

impl Timestamp {
    /// Create a new timestamp from nanoseconds since Unix epoch
    pub fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Create a timestamp from the current time
    pub fn now() -> Self {
        Self { nanos: nanos() }
    }

    /// Convert to chrono DateTime<Utc>
    pub fn to_datetime(&self) -> DateTime<Utc> {
        let secs = self.nanos / NANOS_PER_SEC;
        let nsecs = (self.nanos % NANOS_PER_SEC) as u32;
        DateTime::from_timestamp(secs as i64, nsecs).unwrap_or_default()
    }

    /// Wall-clock time at a fixed UTC offset.
    ///
    /// `None` if `offset_hours` is outside `-23..=23`.
    pub fn to_calendar_time(&self, offset_hours: i32) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(offset_hours.checked_mul(3600)?)?;
        Some(self.to_datetime().with_timezone(&offset))
    }

    /// `yyyy-mm-dd HH:MM:SS.nnnnnnnnn +hh:mm` at the given offset
    ///
    /// ```
    /// # use quantkit_core::timing::Timestamp;
    /// let ts = Timestamp::from_nanos(1_000_000_123);
    /// assert_eq!(
    ///     ts.format_with_offset(9).unwrap(),
    ///     "1970-01-01 09:00:01.000000123 +09:00"
    /// );
    /// ```
    pub fn format_with_offset(&self, offset_hours: i32) -> Option<String> {
        self.to_calendar_time(offset_hours)
            .map(|dt| dt.format(CALENDAR_FORMAT).to_string())
    }

    /// Get elapsed time since this timestamp in nanoseconds
    pub fn elapsed_nanos(&self) -> u64 {
        nanos().saturating_sub(self.nanos)
    }

    /// Get elapsed time since this timestamp in microseconds
    pub fn elapsed_micros(&self) -> u64 {
        self.elapsed_nanos() / 1_000
    }

    /// Get elapsed time since this timestamp in milliseconds
    pub fn elapsed_millis(&self) -> u64 {
        self.elapsed_nanos() / 1_000_000
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        let nanos = dt.timestamp() as u64 * NANOS_PER_SEC + dt.timestamp_subsec_nanos() as u64;
        Self { nanos }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_datetime().format("%Y-%m-%d %H:%M:%S%.9f UTC"))
    }
}

/// Wall-clock nanoseconds since Unix epoch
#[inline]
pub fn nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}
