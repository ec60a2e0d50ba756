//! CLI command implementations.

pub(crate) mod bars;
pub(crate) mod clean;
pub(crate) mod sources;

use tickbar_lib::PipelineConfig;

/// Builds the pipeline configuration shared by the `bars` and `clean` commands.
pub(crate) fn pipeline_config(workers: Option<usize>, date_offset: usize) -> PipelineConfig {
    let config = PipelineConfig::default().with_date_offset(date_offset);
    workers.map_or(config, |workers| config.with_workers(workers))
}
