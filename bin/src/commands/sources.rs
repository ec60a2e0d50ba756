//! Sources command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use tickbar_lib::discover_sources;

/// List the tick files under `data` with the date decoded from each name.
pub(crate) fn list_sources(data: &Path, date_offset: usize) -> Result<()> {
    let sources = discover_sources(data, date_offset)
        .with_context(|| format!("Cannot list {}", data.display()))?;

    if sources.is_empty() {
        println!("No tick files found.");
        return Ok(());
    }

    println!("{:<12} {:<40}", "DATE", "FILE");
    println!("{}", "-".repeat(52));

    for source in &sources {
        println!("{:<12} {:<40}", source.date.to_string(), source.name());
    }

    println!("\nTotal: {} files", sources.len());
    Ok(())
}
