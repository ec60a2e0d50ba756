//! Bars command implementation.
//!
//! Runs the ingest pipeline over a data directory, aggregates the merged
//! ticks over one window, and writes the bars.

use super::pipeline_config;
use crate::display::{Format, StageProgress, write_bars};
use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use tickbar_lib::bars_file_name;
use tickbar_lib::prelude::*;
use tracing::info;

/// Arguments of the `bars` command.
pub(crate) struct BarsArgs {
    pub(crate) data: PathBuf,
    pub(crate) start: String,
    pub(crate) end: String,
    pub(crate) interval: String,
    pub(crate) output: Option<PathBuf>,
    pub(crate) format: Format,
    pub(crate) workers: Option<usize>,
    pub(crate) date_offset: usize,
    pub(crate) quiet: bool,
}

/// Aggregate every tick file under `args.data` into bars over the requested window.
pub(crate) fn bars(args: &BarsArgs) -> Result<()> {
    // Validate the query before touching any file
    let window = WindowSpec::parse(&args.start, &args.end).context("Invalid window")?;
    let interval: IntervalSpec = args
        .interval
        .parse()
        .with_context(|| format!("Invalid interval: {}", args.interval))?;

    let pipeline = Pipeline::new(pipeline_config(args.workers, args.date_offset));
    let sources = pipeline
        .discover(&args.data)
        .with_context(|| format!("Cannot list {}", args.data.display()))?;
    if sources.is_empty() {
        bail!("No tick files found in {}", args.data.display());
    }

    let progress = StageProgress::new(args.quiet)?;
    let ticks = pipeline.run_with_progress(&sources, &progress)?;
    progress.finish(format!("Merged {} ticks from {} files", ticks.len(), sources.len()));

    let bars = BarAggregator::new(window, interval).aggregate(&ticks);
    info!(bars = bars.len(), %window, %interval, "aggregated");

    let output = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(bars_file_name(&window, &interval, args.format.into()))
    });
    write_bars(&bars, &output, args.format)?;

    if !args.quiet {
        println!("{} bars written to: {}", bars.len(), output.display());
    }

    Ok(())
}
