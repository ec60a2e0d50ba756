//! JSON and NDJSON output.
//!
//! Records are keyed by the column names of [`BAR_COLUMNS`] and
//! [`TICK_COLUMNS`](crate::TICK_COLUMNS), in column order, with timestamps
//! written as text in the same layout as the CSV output.
//!
//! [`BAR_COLUMNS`]: crate::BAR_COLUMNS

use serde::Serialize;
use std::io::Write;
use tickbar_aggregate::Ohlcv;
use tickbar_types::Tick;

use crate::formatter::{BAR_TIME_FORMAT, TICK_TIME_FORMAT};
use crate::{FormatError, Formatter};

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct BarRecord {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: i64,
}

impl From<&Ohlcv> for BarRecord {
    fn from(bar: &Ohlcv) -> Self {
        Self {
            timestamp: bar.timestamp.format(BAR_TIME_FORMAT).to_string(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct TickRecord {
    timestamp: String,
    price: f64,
    size: i64,
}

impl From<&Tick> for TickRecord {
    fn from(tick: &Tick) -> Self {
        Self {
            timestamp: tick.timestamp.format(TICK_TIME_FORMAT).to_string(),
            price: tick.price,
            size: tick.size,
        }
    }
}

/// Writes records as one JSON array, or one object per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter {
    lines: bool,
    pretty: bool,
}

impl JsonFormatter {
    /// A formatter that writes a single JSON array.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: false,
            pretty: false,
        }
    }

    /// A formatter that writes newline-delimited JSON, one record per line.
    #[must_use]
    pub const fn lines() -> Self {
        Self {
            lines: true,
            pretty: false,
        }
    }

    /// Indents the array output. Has no effect on line-delimited output.
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn write_records<R, W>(&self, records: impl Iterator<Item = R>, mut writer: W) -> Result<(), FormatError>
    where
        R: Serialize,
        W: Write,
    {
        if self.lines {
            for record in records {
                serde_json::to_writer(&mut writer, &record)?;
                writeln!(writer)?;
            }
        } else {
            let records: Vec<R> = records.collect();
            if self.pretty {
                serde_json::to_writer_pretty(&mut writer, &records)?;
            } else {
                serde_json::to_writer(&mut writer, &records)?;
            }
            writeln!(writer)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Ohlcv], writer: W) -> Result<(), FormatError> {
        self.write_records(bars.iter().map(BarRecord::from), writer)
    }

    fn write_ticks<W: Write + Send>(&self, ticks: &[Tick], writer: W) -> Result<(), FormatError> {
        self.write_records(ticks.iter().map(TickRecord::from), writer)
    }
}
