//! Core types for the tickbar tick-to-OHLCV pipeline.
//!
//! This crate provides the fundamental data structures used throughout tickbar:
//!
//! - [`Tick`] - A single cleaned trade with timestamp, price, and size
//! - [`RawTick`] - Textual trade fields as loaded from a source file
//! - [`IntervalSpec`] - Bucket width for OHLCV aggregation
//! - [`WindowSpec`] - Half-open time window to aggregate over
//! - [`SourceFile`] - One day's tick file and the date encoded in its name

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod interval;
mod source;
mod tick;
mod window;

pub use error::{BoxError, IntervalError, Result, SourceFileError, TickbarError, WindowError};
pub use interval::IntervalSpec;
pub use source::{DEFAULT_DATE_OFFSET, SourceFile, date_from_file_name};
pub use tick::{RawTick, Tick};
pub use window::{WindowSpec, parse_instant};
