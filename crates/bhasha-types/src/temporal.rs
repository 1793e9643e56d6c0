use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Submission timestamp for a contribution.
///
/// A wall-clock millisecond component plus a logical counter that breaks
/// ties between submissions landing in the same millisecond (or arriving
/// after a backwards clock step). Stamps issued by one ledger are strictly
/// increasing.
///
/// Ordering: `physical_ms` → `logical`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubmissionStamp {
    /// Wall-clock milliseconds since UNIX epoch.
    pub physical_ms: u64,
    /// Logical counter for submissions at the same physical time.
    pub logical: u32,
}

impl SubmissionStamp {
    /// Create a new stamp with explicit values.
    pub fn new(physical_ms: u64, logical: u32) -> Self {
        Self {
            physical_ms,
            logical,
        }
    }

    /// Create a stamp for the current wall-clock time.
    pub fn now() -> Self {
        let physical_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self {
            physical_ms,
            logical: 0,
        }
    }

    /// The zero stamp.
    pub const fn zero() -> Self {
        Self {
            physical_ms: 0,
            logical: 0,
        }
    }

    /// Next stamp strictly after `previous`, taken from the wall clock when
    /// it has moved forward.
    pub fn next_after(previous: Option<&Self>) -> Self {
        Self::next_from(Self::now(), previous)
    }

    fn next_from(now: Self, previous: Option<&Self>) -> Self {
        match previous {
            None => now,
            Some(prev) if now.physical_ms > prev.physical_ms => now,
            Some(prev) => Self::new(prev.physical_ms, prev.logical.saturating_add(1)),
        }
    }

    /// Wall-clock component as a UTC datetime.
    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(self.physical_ms as i64).unwrap_or_default()
    }

    /// RFC 3339 rendering with millisecond precision, used in exports.
    pub fn to_rfc3339(&self) -> String {
        self.to_datetime()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Minute-resolution rendering (`YYYY-MM-DD HH:MM`) for tables.
    pub fn to_minute_string(&self) -> String {
        self.to_datetime().format("%Y-%m-%d %H:%M").to_string()
    }
}

impl fmt::Debug for SubmissionStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubmissionStamp({}ms.{})", self.physical_ms, self.logical)
    }
}

impl fmt::Display for SubmissionStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}
