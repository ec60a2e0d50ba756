//! Turn daily tick files into windowed OHLCV bars.
//!
//! This is a facade crate that re-exports functionality from the tickbar
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use tickbar_lib::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = Pipeline::new(PipelineConfig::default());
//!     let sources = pipeline.discover("data".as_ref())?;
//!     let ticks = pipeline.run(&sources)?;
//!
//!     let window = WindowSpec::parse("2024-01-02 10:00:00", "2024-01-02 16:00:00")?;
//!     let interval: IntervalSpec = "1h30m".parse()?;
//!     let bars = BarAggregator::new(window, interval).aggregate(&ticks);
//!
//!     CsvFormatter::new().write_bars(&bars, std::io::stdout().lock())?;
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tickbar_types::*;

// Re-export ingest functionality
#[cfg(feature = "ingest")]
pub use tickbar_ingest::{
    CleanError, FileTicks, LoadError, NoProgress, Pipeline, PipelineConfig, Progress, Stage,
    clean, dedup, discover_sources, load_file, load_rows, merge,
};

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use tickbar_aggregate::{BarAggregator, Ohlcv, aggregate};

// Re-export formatters
#[cfg(feature = "format")]
pub use tickbar_format::{
    BAR_COLUMNS, CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat, TICK_COLUMNS,
    bars_file_name,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use tickbar_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use tickbar_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickbar_types::{
        IntervalSpec, RawTick, Result, SourceFile, Tick, TickbarError, WindowSpec,
    };

    #[cfg(feature = "ingest")]
    pub use tickbar_ingest::{Pipeline, PipelineConfig, Progress, Stage};

    #[cfg(feature = "aggregate")]
    pub use tickbar_aggregate::{BarAggregator, Ohlcv};

    #[cfg(feature = "format")]
    pub use tickbar_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use tickbar_format::ParquetFormatter;
}
