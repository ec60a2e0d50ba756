//! Tick file loading, cleaning, and deduplication for tickbar.
//!
//! This crate turns a directory of daily tick files into one merged,
//! time-ordered tick sequence:
//!
//! - [`load_rows`] / [`load_file`] - Read raw rows, dropping empty, header, and misdated rows
//! - [`clean`] - Parse fields and correct sign and misplaced-decimal prices
//! - [`dedup`] - Collapse adjacent same-timestamp ticks, keeping the larger size
//! - [`Pipeline`] - Run the three stages per file on a fixed-size worker pool and merge

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clean;
mod dedup;
mod load;
mod pipeline;

pub use clean::{
    CleanError, DECIMAL_SHIFT, OUTLIER_THRESHOLD, TIMESTAMP_FORMAT, clean, clean_tick,
    correct_price,
};
pub use dedup::dedup;
pub use load::{HEADER_FIELD, LoadError, load_file, load_rows};
pub use pipeline::{
    FileTicks, NoProgress, Pipeline, PipelineConfig, Progress, Stage, discover_sources, merge,
};
