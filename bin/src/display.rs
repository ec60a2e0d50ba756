//! Display utilities and output formatting for the tickbar CLI.

use anyhow::{Context, Result};
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tickbar_lib::prelude::*;

/// Output format for bars and cleaned ticks.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
    Parquet,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
            Format::Parquet => Self::Parquet,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", OutputFormat::from(*self))
    }
}

fn create_output(output: &Path) -> Result<BufWriter<File>> {
    let file =
        File::create(output).with_context(|| format!("Cannot create {}", output.display()))?;
    Ok(BufWriter::new(file))
}

/// Write ticks to a file in the specified format.
pub(crate) fn write_ticks(ticks: &[Tick], output: &Path, format: Format) -> Result<()> {
    let writer = create_output(output)?;
    OutputFormat::from(format).write_ticks(ticks, writer)?;
    Ok(())
}

/// Write OHLCV bars to a file in the specified format.
pub(crate) fn write_bars(bars: &[Ohlcv], output: &Path, format: Format) -> Result<()> {
    let writer = create_output(output)?;
    OutputFormat::from(format).write_bars(bars, writer)?;
    Ok(())
}

/// Pipeline progress rendered as one bar that restarts for every stage.
pub(crate) struct StageProgress {
    bar: ProgressBar,
}

impl StageProgress {
    /// Creates a progress display, hidden when `quiet` is set.
    pub(crate) fn new(quiet: bool) -> Result<Self> {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(0);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] {msg:>6} [{bar:40.cyan/blue}] {pos}/{len} files")?
                    .progress_chars("=>-"),
            );
            pb
        };
        Ok(Self { bar })
    }

    /// Clears the bar and leaves `message` in its place.
    pub(crate) fn finish(&self, message: String) {
        self.bar.finish_with_message(message);
    }
}

impl Progress for StageProgress {
    fn stage_started(&self, stage: Stage, files: usize) {
        self.bar.set_length(files as u64);
        self.bar.set_position(0);
        self.bar.set_message(stage.to_string());
    }

    fn file_finished(&self, _stage: Stage) {
        self.bar.inc(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_maps_to_output_format() {
        assert_eq!(OutputFormat::from(Format::Ndjson), OutputFormat::Ndjson);
        assert_eq!(Format::Parquet.to_string(), "parquet");
    }

    #[test]
    fn test_write_bars_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.csv");
        let window = WindowSpec::parse("2024-01-02 10:00:00", "2024-01-02 10:01:00").unwrap();
        let bars = vec![Ohlcv::new(window.start, 1.0, 2.0, 0.5, 1.5, 3)];

        write_bars(&bars, &path, Format::Csv).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "Timestamp,Open,High,Low,Close,Volume\n2024-01-02 10:00:00,1,2,0.5,1.5,3\n"
        );
    }

    #[test]
    fn test_write_bars_ndjson_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.ndjson");
        let window = WindowSpec::parse("2024-01-02 10:00:00", "2024-01-02 10:01:00").unwrap();
        let bars = vec![Ohlcv::new(window.start, 1.0, 2.0, 0.5, 1.5, 3)];

        write_bars(&bars, &path, Format::Ndjson).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "{\"Timestamp\":\"2024-01-02 10:00:00\",\"Open\":1.0,\"High\":2.0,\"Low\":0.5,\"Close\":1.5,\"Volume\":3}\n"
        );
    }
}
