//! Error types for tickbar.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias for tickbar operations.
pub type Result<T> = std::result::Result<T, TickbarError>;

/// Boxed error from a stage crate, kept as the source of a [`TickbarError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while building bars from tick files.
#[derive(Error, Debug)]
pub enum TickbarError {
    /// A source file could not be loaded.
    #[error("Failed to load {file}")]
    Load {
        /// The offending file.
        file: String,
        /// The underlying load error.
        #[source]
        source: BoxError,
    },

    /// A loaded row could not be converted into a tick.
    #[error("Failed to clean {file}")]
    Clean {
        /// The offending file.
        file: String,
        /// The underlying parse error.
        #[source]
        source: BoxError,
    },

    /// Invalid source file name.
    #[error(transparent)]
    SourceFile(#[from] SourceFileError),

    /// Invalid bucket interval.
    #[error(transparent)]
    Interval(#[from] IntervalError),

    /// Invalid aggregation window.
    #[error(transparent)]
    Window(#[from] WindowError),

    /// The worker pool could not be started.
    #[error("Worker pool error: {0}")]
    Pool(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error for invalid bucket intervals.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    /// Every component of the interval is zero.
    #[error("Interval must be longer than zero")]
    Zero,

    /// The interval text could not be parsed.
    #[error("Invalid interval '{0}', expected a form like 1d2h30m15s")]
    Syntax(String),

    /// The interval does not fit in a time delta.
    #[error("Interval '{0}' is too large")]
    Overflow(String),
}

/// Error for invalid aggregation windows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// Start is not strictly before end.
    #[error("Invalid window: {start} is not before {end}")]
    InvalidRange {
        /// The window start.
        start: DateTime<Utc>,
        /// The window end.
        end: DateTime<Utc>,
    },

    /// A window bound could not be parsed.
    #[error("Invalid date or time '{0}', expected YYYY-MM-DD[ HH:MM:SS[.ffffff]]")]
    Instant(String),
}

/// Error for source file names that do not encode a date.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceFileError {
    /// The path has no UTF-8 file name.
    #[error("Source path has no usable file name: {0}")]
    NoFileName(String),

    /// No valid `YYYYMMDD` date at the expected offset.
    #[error("File name '{name}' has no YYYYMMDD date at offset {offset}")]
    NoDate {
        /// The file name.
        name: String,
        /// Byte offset where the date was expected.
        offset: usize,
    },
}
