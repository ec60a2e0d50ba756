//! OHLCV (candlestick) data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV bar (candlestick) data for one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlcv {
    /// Bucket start time.
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price during the bucket.
    pub high: f64,
    /// Lowest price during the bucket.
    pub low: f64,
    /// Closing price (last trade consumed so far).
    pub close: f64,
    /// Total size traded during the bucket.
    pub volume: i64,
}

impl Ohlcv {
    /// Creates a new OHLCV bar.
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: i64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns true if open and close both lie within `[low, high]`.
    ///
    /// Holds for every bar that consumed at least one tick. A bar for an
    /// empty bucket takes its close from an earlier trade and may fall outside.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let within = |price: f64| self.low <= price && price <= self.high;
        within(self.open) && within(self.close)
    }
}
