//! Field parsing and price correction.

use chrono::NaiveDateTime;
use thiserror::Error;
use tickbar_types::{RawTick, Tick};

/// Timestamp layout of source rows (`YYYY-MM-DD HH:MM:SS.ffffff`).
///
/// The fraction is required and holds 1 to 6 digits.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Prices below this are assumed to have a misplaced decimal point.
pub const OUTLIER_THRESHOLD: f64 = 300.0;

/// Factor applied to prices below [`OUTLIER_THRESHOLD`].
pub const DECIMAL_SHIFT: f64 = 10.0;

/// Errors that can occur while converting a raw row into a tick.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CleanError {
    /// Timestamp text does not match [`TIMESTAMP_FORMAT`].
    #[error("Row {row}: invalid timestamp '{text}'")]
    Timestamp {
        /// 0-based index in the file's loaded rows.
        row: usize,
        /// The offending text.
        text: String,
    },

    /// Price text is not a floating-point number.
    #[error("Row {row}: invalid price '{text}'")]
    Price {
        /// 0-based index in the file's loaded rows.
        row: usize,
        /// The offending text.
        text: String,
    },

    /// Size text is not an integer.
    #[error("Row {row}: invalid size '{text}'")]
    Size {
        /// 0-based index in the file's loaded rows.
        row: usize,
        /// The offending text.
        text: String,
    },
}

/// Applies the sign and misplaced-decimal corrections to a price.
///
/// A negative price is negated. Otherwise a price below [`OUTLIER_THRESHOLD`]
/// is multiplied by [`DECIMAL_SHIFT`] once; the result is not re-checked, so
/// a price that is still low stays low. Prices at or above the threshold are
/// returned unchanged, which makes the correction idempotent for them.
///
/// This is a heuristic: instruments that legitimately trade below the
/// threshold are scaled up too.
#[must_use]
pub fn correct_price(price: f64) -> f64 {
    if price < 0.0 {
        -price
    } else if price < OUTLIER_THRESHOLD {
        price * DECIMAL_SHIFT
    } else {
        price
    }
}

/// Converts one raw row into a cleaned tick.
///
/// `row` is only used for error reporting.
///
/// # Errors
///
/// Returns an error if any field fails to parse.
pub fn clean_tick(raw: &RawTick, row: usize) -> Result<Tick, CleanError> {
    let timestamp = parse_timestamp(raw.timestamp.trim())
        .ok_or_else(|| CleanError::Timestamp {
            row,
            text: raw.timestamp.clone(),
        })?
        .and_utc();

    let price: f64 = raw.price.trim().parse().map_err(|_| CleanError::Price {
        row,
        text: raw.price.clone(),
    })?;

    let size: i64 = raw.size.trim().parse().map_err(|_| CleanError::Size {
        row,
        text: raw.size.clone(),
    })?;

    Ok(Tick::new(timestamp, correct_price(price), size))
}

/// Longest accepted fractional-second part (microseconds).
const MAX_FRACTION_DIGITS: usize = 6;

/// Parses a timestamp that carries a `.` and 1 to 6 fractional digits.
///
/// chrono's `%.f` alone would also accept a missing fraction and up to nine
/// digits.
fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let (_, fraction) = text.rsplit_once('.')?;
    let digits_ok = (1..=MAX_FRACTION_DIGITS).contains(&fraction.len())
        && fraction.bytes().all(|b| b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()
}

/// Converts a file's raw rows into cleaned ticks, preserving order.
///
/// # Errors
///
/// Returns the first parse failure; no partial result is produced.
pub fn clean(raw: Vec<RawTick>) -> Result<Vec<Tick>, CleanError> {
    raw.iter()
        .enumerate()
        .map(|(row, tick)| clean_tick(tick, row))
        .collect()
}
