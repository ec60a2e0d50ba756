//! Aggregation window.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{IntervalSpec, WindowError};

/// Formats accepted for a full date-time window bound.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// A half-open time window `[start, end)` to aggregate over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowSpec {
    /// Start of the first bucket (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (exclusive).
    pub end: DateTime<Utc>,
}

impl WindowSpec {
    /// Creates a new window, validating that start < end.
    ///
    /// # Errors
    ///
    /// Returns an error if start >= end.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, WindowError> {
        if start >= end {
            return Err(WindowError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a window from two textual bounds.
    ///
    /// Each bound accepts `YYYY-MM-DD HH:MM:SS[.ffffff]`,
    /// `YYYY-MM-DDTHH:MM:SS[.ffffff]`, or a bare `YYYY-MM-DD` (midnight).
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is malformed or start >= end.
    pub fn parse(start: &str, end: &str) -> Result<Self, WindowError> {
        Self::new(parse_instant(start)?, parse_instant(end)?)
    }

    /// Returns the window length.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns true if the window contains the given instant.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Returns the number of buckets of the given width needed to cover the window.
    ///
    /// This is an upper bound on the number of bars aggregation can emit.
    #[must_use]
    pub fn bucket_count(&self, interval: &IntervalSpec) -> u64 {
        let window = u64::try_from(self.duration().num_microseconds().unwrap_or(i64::MAX))
            .unwrap_or(0);
        let width = interval.total_seconds().saturating_mul(1_000_000);
        window.div_ceil(width)
    }
}

impl std::fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d %H:%M:%S"),
            self.end.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// Parses a window bound into a UTC instant.
///
/// # Errors
///
/// Returns an error if the text matches none of the accepted forms.
pub fn parse_instant(text: &str) -> Result<DateTime<Utc>, WindowError> {
    let trimmed = text.trim();

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| WindowError::Instant(text.to_string()))
}
