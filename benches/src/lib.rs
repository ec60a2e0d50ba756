//! Synthetic tick data for tickbar benchmarks.

use chrono::{NaiveDate, TimeDelta};
use std::fmt::Write as _;
use std::io;
use std::path::Path;
use tempfile::TempDir;
use tickbar_lib::{RawTick, Tick};

/// Shape of one synthetic trading day.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticDay {
    /// Calendar date of the day.
    pub date: NaiveDate,
    /// Number of rows.
    pub rows: usize,
    /// Every `nth` row repeats the previous timestamp (0 disables).
    pub duplicate_every: usize,
    /// Every `nth` row has its price shifted one decimal place (0 disables).
    pub misplaced_every: usize,
}

impl SyntheticDay {
    /// A day of `rows` rows with occasional duplicates and misplaced decimals.
    pub const fn new(date: NaiveDate, rows: usize) -> Self {
        Self {
            date,
            rows,
            duplicate_every: 7,
            misplaced_every: 53,
        }
    }

    fn price(&self, index: usize) -> f64 {
        let price = 400.0 + ((index * 37) % 200) as f64 / 10.0;
        if self.misplaced_every > 0 && index % self.misplaced_every == 0 {
            price / 10.0
        } else {
            price
        }
    }

    fn offset(&self, index: usize) -> TimeDelta {
        let step = if self.duplicate_every > 0 {
            index - index / self.duplicate_every
        } else {
            index
        };
        TimeDelta::milliseconds(step as i64 * 250)
    }

    /// Generates the day's rows in textual form, starting at 09:30.
    pub fn raw_ticks(&self) -> Vec<RawTick> {
        let open = self.date.and_hms_opt(9, 30, 0).unwrap_or_default();
        (0..self.rows)
            .map(|i| {
                RawTick::new(
                    (open + self.offset(i))
                        .format("%Y-%m-%d %H:%M:%S%.6f")
                        .to_string(),
                    format!("{:.2}", self.price(i)),
                    ((i % 9) + 1).to_string(),
                )
            })
            .collect()
    }

    /// Generates the day's rows as already-cleaned ticks.
    pub fn ticks(&self) -> Vec<Tick> {
        let open = self.date.and_hms_opt(9, 30, 0).unwrap_or_default().and_utc();
        (0..self.rows)
            .map(|i| Tick::new(open + self.offset(i), self.price(i), (i % 9) as i64 + 1))
            .collect()
    }

    /// Renders the day as a tick file with a header row.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("Timestamp,Price,Size\n");
        for raw in self.raw_ticks() {
            let _ = writeln!(out, "{},{},{}", raw.timestamp, raw.price, raw.size);
        }
        out
    }

    /// Source file name for this day.
    pub fn file_name(&self) -> String {
        format!("CTG_tick_{}.csv", self.date.format("%Y%m%d"))
    }
}

/// Writes `days` consecutive synthetic days into a fresh temporary directory.
///
/// # Errors
///
/// Returns an error if the directory or any file cannot be created.
pub fn synthetic_data_dir(first: NaiveDate, days: usize, rows: usize) -> io::Result<TempDir> {
    let dir = TempDir::new()?;
    for day in first.iter_days().take(days) {
        write_day(dir.path(), &SyntheticDay::new(day, rows))?;
    }
    Ok(dir)
}

fn write_day(dir: &Path, day: &SyntheticDay) -> io::Result<()> {
    std::fs::write(dir.join(day.file_name()), day.to_csv())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickbar_lib::{DEFAULT_DATE_OFFSET, date_from_file_name};

    fn day() -> SyntheticDay {
        SyntheticDay::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 100)
    }

    #[test]
    fn test_file_name_carries_date() {
        let day = day();
        assert_eq!(
            date_from_file_name(&day.file_name(), DEFAULT_DATE_OFFSET),
            Some(day.date)
        );
    }

    #[test]
    fn test_ticks_are_sorted() {
        let ticks = day().ticks();
        assert_eq!(ticks.len(), 100);
        assert!(ticks.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert!(ticks.windows(2).any(|w| w[0].timestamp == w[1].timestamp));
    }
}
