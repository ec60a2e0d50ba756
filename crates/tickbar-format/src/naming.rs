//! Output file naming.

use tickbar_types::{IntervalSpec, WindowSpec};

use crate::OutputFormat;

const NAME_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Returns the default file name for bars aggregated over `window` at `interval`.
///
/// The name is `bars_{start}_{end}_{interval}.{ext}`, with both instants
/// written as `YYYYMMDDTHHMMSS`.
#[must_use]
pub fn bars_file_name(window: &WindowSpec, interval: &IntervalSpec, format: OutputFormat) -> String {
    format!(
        "bars_{}_{}_{}.{}",
        window.start.format(NAME_TIME_FORMAT),
        window.end.format(NAME_TIME_FORMAT),
        interval,
        format.extension()
    )
}
