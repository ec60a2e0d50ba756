//! CSV output format.

use std::io::Write;
use tickbar_aggregate::Ohlcv;
use tickbar_types::Tick;

use crate::formatter::{BAR_TIME_FORMAT, TICK_TIME_FORMAT};
use crate::{BAR_COLUMNS, FormatError, Formatter, TICK_COLUMNS};

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }

    fn write_header<W: Write>(&self, writer: &mut W, columns: &[&str]) -> std::io::Result<()> {
        if self.include_header {
            let delimiter = self.delimiter.to_string();
            writeln!(writer, "{}", columns.join(delimiter.as_str()))?;
        }
        Ok(())
    }
}

impl Formatter for CsvFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Ohlcv], mut writer: W) -> Result<(), FormatError> {
        let d = self.delimiter;
        self.write_header(&mut writer, &BAR_COLUMNS)?;

        for bar in bars {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                bar.timestamp.format(BAR_TIME_FORMAT),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume
            )?;
        }

        writer.flush()?;
        Ok(())
    }

    fn write_ticks<W: Write + Send>(&self, ticks: &[Tick], mut writer: W) -> Result<(), FormatError> {
        let d = self.delimiter;
        self.write_header(&mut writer, &TICK_COLUMNS)?;

        for tick in ticks {
            writeln!(
                writer,
                "{}{d}{}{d}{}",
                tick.timestamp.format(TICK_TIME_FORMAT),
                tick.price,
                tick.size
            )?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};
    use std::io::Cursor;

    fn create_test_tick() -> Tick {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 30).unwrap()
            + TimeDelta::microseconds(250);
        Tick::new(timestamp, 417.2, 5)
    }

    fn create_test_bars() -> Vec<Ohlcv> {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
        vec![
            Ohlcv::new(start, 100.0, 101.0, 100.0, 101.0, 8),
            Ohlcv::new(start + TimeDelta::minutes(1), 99.0, 99.0, 99.0, 99.0, 2),
        ]
    }

    #[test]
    fn test_csv_bars() {
        let formatter = CsvFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&create_test_bars(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines[0], "Timestamp,Open,High,Low,Close,Volume");
        assert_eq!(lines[1], "2024-01-02 10:00:00,100,101,100,101,8");
        assert_eq!(lines[2], "2024-01-02 10:01:00,99,99,99,99,2");
    }

    #[test]
    fn test_csv_ticks() {
        let formatter = CsvFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter.write_ticks(&[create_test_tick()], &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with("Timestamp,Price,Size\n"));
        assert!(result.contains("2024-01-02 10:00:30.000250,417.2,5"));
    }

    #[test]
    fn test_csv_no_header() {
        let formatter = CsvFormatter::new().with_header(false);
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&create_test_bars(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(!result.contains("Timestamp"));
        assert_eq!(result.lines().count(), 2);
    }

    #[test]
    fn test_tsv() {
        let formatter = CsvFormatter::tsv();
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&create_test_bars(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(result.lines().next(), Some("Timestamp\tOpen\tHigh\tLow\tClose\tVolume"));
        assert_eq!(result.lines().nth(1), Some("2024-01-02 10:00:00\t100\t101\t100\t101\t8"));
    }
}
