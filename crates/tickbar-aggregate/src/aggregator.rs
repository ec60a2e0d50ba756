//! Cursor-based tick-to-OHLCV aggregation.

use chrono::{DateTime, Utc};
use tickbar_types::{IntervalSpec, Tick, WindowSpec};
use tracing::debug;

use crate::Ohlcv;

/// Aggregates a time-ordered tick sequence into fixed-width bars over a window.
#[derive(Debug, Clone, Copy)]
pub struct BarAggregator {
    window: WindowSpec,
    interval: IntervalSpec,
}

impl BarAggregator {
    /// Creates a new aggregator for the given window and bucket width.
    #[must_use]
    pub const fn new(window: WindowSpec, interval: IntervalSpec) -> Self {
        Self { window, interval }
    }

    /// Returns the aggregation window.
    #[must_use]
    pub const fn window(&self) -> WindowSpec {
        self.window
    }

    /// Returns the bucket width.
    #[must_use]
    pub const fn interval(&self) -> IntervalSpec {
        self.interval
    }

    /// Builds one bar per bucket from the window start.
    ///
    /// A single cursor, anchored at the first tick at or after the window
    /// start, only ever moves forward, so the pass is linear in the number
    /// of ticks plus buckets. Buckets advance until the window end or until
    /// the ticks run out; trailing buckets past the last tick are not emitted.
    ///
    /// A bucket with no ticks does not move the cursor. Its open, high, and
    /// low are the price of the next unconsumed tick, its close is the price
    /// of the last tick consumed before it, and its volume is zero. A leading
    /// empty bucket with nothing before it closes at its open.
    ///
    /// `ticks` must be sorted by timestamp. An empty sequence, a window after
    /// the last tick, or a window that ends before the first tick yields no
    /// bars. A window that falls in a gap between ticks yields one empty
    /// bar per bucket.
    #[must_use]
    pub fn aggregate(&self, ticks: &[Tick]) -> Vec<Ohlcv> {
        let mut bars = Vec::new();
        let mut cursor = anchor_index(ticks, self.window.start);

        // Window entirely before the data: nothing to look back to.
        if cursor == 0 && ticks.first().is_some_and(|t| t.timestamp >= self.window.end) {
            return bars;
        }

        let anchor = cursor;
        let step = self.interval.duration();
        let mut bucket_start = self.window.start;

        while bucket_start < self.window.end && cursor < ticks.len() {
            let bucket_end = bucket_start
                .checked_add_signed(step)
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            let mut bar = OhlcvBuilder::new(bucket_start, ticks[cursor].price);

            while cursor < ticks.len() && ticks[cursor].timestamp < bucket_end {
                bar.update(&ticks[cursor]);
                cursor += 1;
            }

            let close = match cursor.checked_sub(1) {
                Some(last) => ticks[last].price,
                None => bar.open,
            };
            bars.push(bar.finish(close));
            bucket_start = bucket_end;
        }

        debug!(
            bars = bars.len(),
            consumed = cursor - anchor,
            window = %self.window,
            interval = %self.interval,
            "aggregated ticks"
        );
        bars
    }
}

/// Aggregates `ticks` over `window` in buckets of `interval`.
///
/// See [`BarAggregator::aggregate`].
#[must_use]
pub fn aggregate(ticks: &[Tick], window: &WindowSpec, interval: &IntervalSpec) -> Vec<Ohlcv> {
    BarAggregator::new(*window, *interval).aggregate(ticks)
}

/// Returns the index of the first tick at or after `start`.
///
/// Binary search over a sorted sequence; returns `ticks.len()` if every
/// tick is earlier than `start`.
#[must_use]
pub fn anchor_index(ticks: &[Tick], start: DateTime<Utc>) -> usize {
    ticks.partition_point(|tick| tick.timestamp < start)
}

/// Builder for OHLCV bars.
#[derive(Debug)]
struct OhlcvBuilder {
    timestamp: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    volume: i64,
}

impl OhlcvBuilder {
    /// Creates a builder seeded with the price at the cursor.
    const fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self {
            timestamp,
            open: price,
            high: price,
            low: price,
            volume: 0,
        }
    }

    /// Folds a consumed tick into the bar.
    fn update(&mut self, tick: &Tick) {
        self.high = self.high.max(tick.price);
        self.low = self.low.min(tick.price);
        self.volume += tick.size;
    }

    /// Finishes building and returns the OHLCV bar.
    const fn finish(self, close: f64) -> Ohlcv {
        Ohlcv::new(
            self.timestamp,
            self.open,
            self.high,
            self.low,
            close,
            self.volume,
        )
    }
}
