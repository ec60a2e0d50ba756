//! Tick data representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded trade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Timestamp of the trade (microsecond resolution, UTC).
    pub timestamp: DateTime<Utc>,
    /// Trade price. Non-negative once cleaned.
    pub price: f64,
    /// Number of units traded.
    pub size: i64,
}

impl Tick {
    /// Creates a new tick.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, price: f64, size: i64) -> Self {
        Self {
            timestamp,
            price,
            size,
        }
    }
}

/// Raw trade fields as read from a source file, before any parsing.
///
/// Rows reach this form only after the loader has dropped rows with empty
/// fields, the header row, and rows dated for a different day than the file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawTick {
    /// Timestamp text, `YYYY-MM-DD HH:MM:SS.ffffff`.
    pub timestamp: String,
    /// Price text.
    pub price: String,
    /// Size text.
    pub size: String,
}

impl RawTick {
    /// Creates a new raw tick from its three text fields.
    #[must_use]
    pub fn new(
        timestamp: impl Into<String>,
        price: impl Into<String>,
        size: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            price: price.into(),
            size: size.into(),
        }
    }

    /// Returns the `YYYYMMDD` digits of the timestamp's date portion.
    ///
    /// Returns `None` when the text is too short to carry a date.
    #[must_use]
    pub fn date_digits(&self) -> Option<String> {
        Self::timestamp_date_digits(&self.timestamp)
    }

    /// Returns the `YYYYMMDD` digits of a `YYYY-MM-DD ...` timestamp text.
    #[must_use]
    pub fn timestamp_date_digits(ts: &str) -> Option<String> {
        let year = ts.get(0..4)?;
        let month = ts.get(5..7)?;
        let day = ts.get(8..10)?;
        Some(format!("{year}{month}{day}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_tick_new() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
        let tick = Tick::new(ts, 417.2, 10);
        assert_eq!(tick.timestamp, ts);
        assert_eq!(tick.size, 10);
    }

    #[test]
    fn test_raw_tick_date_digits() {
        let raw = RawTick::new("2024-01-02 10:00:00.000000", "417.2", "5");
        assert_eq!(raw.date_digits().as_deref(), Some("20240102"));
    }

    #[test]
    fn test_raw_tick_date_digits_short() {
        let raw = RawTick::new("2024-01", "417.2", "5");
        assert_eq!(raw.date_digits(), None);
    }
}
