//! Windowed OHLCV aggregation for tickbar.
//!
//! This crate provides tick-to-OHLCV (candlestick) aggregation:
//!
//! - [`Ohlcv`] - OHLCV bar data structure
//! - [`BarAggregator`] - Cursor-based aggregator over a window and interval

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod ohlcv;

pub use aggregator::{BarAggregator, aggregate, anchor_index};
pub use ohlcv::Ohlcv;
