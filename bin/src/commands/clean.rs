//! Clean command implementation.

use super::pipeline_config;
use crate::display::{Format, StageProgress, write_ticks};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tickbar_lib::prelude::*;

/// Load, clean, and deduplicate every tick file under `data`.
///
/// Prints the merged tick count and, when `output` is given, writes the
/// merged ticks there.
pub(crate) fn clean(
    data: &Path,
    output: Option<PathBuf>,
    format: Format,
    workers: Option<usize>,
    date_offset: usize,
    quiet: bool,
) -> Result<()> {
    let pipeline = Pipeline::new(pipeline_config(workers, date_offset));
    let sources = pipeline
        .discover(data)
        .with_context(|| format!("Cannot list {}", data.display()))?;

    let progress = StageProgress::new(quiet)?;
    let ticks = pipeline.run_with_progress(&sources, &progress)?;
    progress.finish(format!("Processed {} files", sources.len()));

    println!("{}", ticks.len());

    if let Some(output) = output {
        write_ticks(&ticks, &output, format)?;
        if !quiet {
            println!("Output written to: {}", output.display());
        }
    }

    Ok(())
}
