//! Raw row loading from daily tick files.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use thiserror::Error;
use tickbar_types::{RawTick, SourceFile};
use tracing::{debug, trace};

/// First field of the header row.
pub const HEADER_FIELD: &str = "Timestamp";

/// Errors that can occur while loading a tick file.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row has no empty fields but too few of them.
    #[error("Row {row} has {fields} fields (expected at least 3)")]
    MissingFields {
        /// 1-based row number.
        row: usize,
        /// Number of fields found.
        fields: usize,
    },
}

/// Loads the raw rows of one day's tick file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a row is malformed.
pub fn load_file(source: &SourceFile) -> Result<Vec<RawTick>, LoadError> {
    let file = File::open(source.path())?;
    let rows = load_rows(BufReader::new(file), source.date)?;
    debug!(file = %source.name(), rows = rows.len(), "loaded source file");
    Ok(rows)
}

/// Loads raw rows from a reader, keeping only rows dated `date`.
///
/// Rows with any empty field, the header row, and rows whose timestamp date
/// differs from `date` are skipped. Surviving rows keep their file order.
///
/// # Errors
///
/// Returns an error on unreadable input or a row with fewer than three fields.
pub fn load_rows<R: Read>(reader: R, date: NaiveDate) -> Result<Vec<RawTick>, LoadError> {
    let expected = date.format("%Y%m%d").to_string();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        match classify(&record, &expected, index + 1)? {
            Some(raw) => rows.push(raw),
            None => skipped += 1,
        }
    }

    trace!(kept = rows.len(), skipped, date = %date, "filtered rows");
    Ok(rows)
}

/// Returns the raw tick for a row, or `None` if the row is to be skipped.
fn classify(
    record: &StringRecord,
    expected_date: &str,
    row: usize,
) -> Result<Option<RawTick>, LoadError> {
    if record.iter().any(str::is_empty) {
        return Ok(None);
    }
    let Some(timestamp) = record.get(0) else {
        return Ok(None);
    };
    if timestamp == HEADER_FIELD {
        return Ok(None);
    }
    if RawTick::timestamp_date_digits(timestamp).as_deref() != Some(expected_date) {
        return Ok(None);
    }

    match (record.get(1), record.get(2)) {
        (Some(price), Some(size)) => Ok(Some(RawTick::new(timestamp, price, size))),
        _ => Err(LoadError::MissingFields {
            row,
            fields: record.len(),
        }),
    }
}
