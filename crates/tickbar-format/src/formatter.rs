//! The bar writer contract and format dispatch.

use std::io::Write;
use thiserror::Error;
use tickbar_aggregate::Ohlcv;
use tickbar_types::Tick;

use crate::{CsvFormatter, JsonFormatter};

/// Bar columns, in output order.
pub const BAR_COLUMNS: [&str; 6] = ["Timestamp", "Open", "High", "Low", "Close", "Volume"];

/// Cleaned tick columns, in output order.
pub const TICK_COLUMNS: [&str; 3] = ["Timestamp", "Price", "Size"];

/// Text layout of a bar's bucket start. Whole seconds print without a fraction.
pub(crate) const BAR_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Text layout of a tick timestamp, the same layout the source files use.
pub(crate) const TICK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Errors that can occur while writing output.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Arrow/Parquet error.
    #[error("Parquet error: {0}")]
    Parquet(String),

    /// The format was not compiled into this build.
    #[error("{0} output is not supported by this build")]
    Unsupported(OutputFormat),
}

/// A writer for aggregated bars.
///
/// Bars are written one row (or record) per bar in the order given, with
/// the fields of [`BAR_COLUMNS`] in that order. Cleaned ticks use
/// [`TICK_COLUMNS`].
pub trait Formatter: Send + Sync {
    /// Writes OHLCV bars.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_bars<W: Write + Send>(&self, bars: &[Ohlcv], writer: W) -> Result<(), FormatError>;

    /// Writes cleaned ticks.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_ticks<W: Write + Send>(&self, ticks: &[Tick], writer: W) -> Result<(), FormatError>;
}

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV with a header row.
    #[default]
    Csv,
    /// One JSON array of records.
    Json,
    /// One JSON record per line.
    Ndjson,
    /// Apache Parquet.
    Parquet,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }

    /// Writes bars with this format's default writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or the format is not compiled in.
    pub fn write_bars<W: Write + Send>(self, bars: &[Ohlcv], writer: W) -> Result<(), FormatError> {
        match self {
            Self::Csv => CsvFormatter::new().write_bars(bars, writer),
            Self::Json => JsonFormatter::new().write_bars(bars, writer),
            Self::Ndjson => JsonFormatter::lines().write_bars(bars, writer),
            #[cfg(feature = "parquet")]
            Self::Parquet => crate::ParquetFormatter::new().write_bars(bars, writer),
            #[cfg(not(feature = "parquet"))]
            Self::Parquet => Err(FormatError::Unsupported(self)),
        }
    }

    /// Writes cleaned ticks with this format's default writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or the format is not compiled in.
    pub fn write_ticks<W: Write + Send>(self, ticks: &[Tick], writer: W) -> Result<(), FormatError> {
        match self {
            Self::Csv => CsvFormatter::new().write_ticks(ticks, writer),
            Self::Json => JsonFormatter::new().write_ticks(ticks, writer),
            Self::Ndjson => JsonFormatter::lines().write_ticks(ticks, writer),
            #[cfg(feature = "parquet")]
            Self::Parquet => crate::ParquetFormatter::new().write_ticks(ticks, writer),
            #[cfg(not(feature = "parquet"))]
            Self::Parquet => Err(FormatError::Unsupported(self)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}
