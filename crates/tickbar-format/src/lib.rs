//! Output formatters for tickbar bars and cleaned ticks.
//!
//! Every formatter writes bars with the columns of [`BAR_COLUMNS`], in
//! that order, and cleaned ticks with [`TICK_COLUMNS`]:
//!
//! - [`CsvFormatter`] - CSV format
//! - [`JsonFormatter`] - JSON array or NDJSON format
//! - [`ParquetFormatter`] - Apache Parquet columnar format
//!
//! [`OutputFormat`] picks a formatter by name. [`bars_file_name`] names an output file after the window and interval
//! it was aggregated over.

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod naming;

#[cfg(feature = "parquet")]
mod parquet;

pub use crate::csv::CsvFormatter;
pub use formatter::{BAR_COLUMNS, FormatError, Formatter, OutputFormat, TICK_COLUMNS};
pub use json::JsonFormatter;
pub use naming::bars_file_name;

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetFormatter;
