//! Source file descriptors.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::SourceFileError;

/// Byte offset of the `YYYYMMDD` date in a source file name (`CTG_tick_20240102.csv`).
pub const DEFAULT_DATE_OFFSET: usize = 9;

/// One day's tick file together with the date encoded in its name.
///
/// Ordering is by date first, then path, which is the order the per-file
/// results are concatenated in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceFile {
    /// Trading day encoded in the file name.
    pub date: NaiveDate,
    /// Location of the file.
    pub path: PathBuf,
}

impl SourceFile {
    /// Creates a source file descriptor with an explicit date.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, date: NaiveDate) -> Self {
        Self {
            date,
            path: path.into(),
        }
    }

    /// Creates a source file descriptor by decoding the date from the file name.
    ///
    /// # Errors
    ///
    /// Returns an error if the path has no file name or no valid date at `offset`.
    pub fn from_path(path: impl Into<PathBuf>, offset: usize) -> Result<Self, SourceFileError> {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| SourceFileError::NoFileName(path.display().to_string()))?;
        let date = date_from_file_name(name, offset).ok_or_else(|| SourceFileError::NoDate {
            name: name.to_string(),
            offset,
        })?;
        Ok(Self { date, path })
    }

    /// Returns the file name, or the full path if it has none.
    #[must_use]
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Returns the encoded date as `YYYYMMDD` digits.
    #[must_use]
    pub fn date_digits(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }

    /// Returns the file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Display for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.date)
    }
}

/// Decodes the 8-digit `YYYYMMDD` date found at `offset` in a file name.
///
/// Returns `None` if the name is too short, the digits are not all ASCII
/// digits, or they do not form a calendar date.
#[must_use]
pub fn date_from_file_name(name: &str, offset: usize) -> Option<NaiveDate> {
    let digits = name.get(offset..offset.checked_add(8)?)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year: i32 = digits[0..4].parse().ok()?;
    let month: u32 = digits[4..6].parse().ok()?;
    let day: u32 = digits[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
