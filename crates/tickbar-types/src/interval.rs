//! Bucket interval definitions.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::IntervalError;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_DAY: u64 = 86_400;

/// Width of one OHLCV bucket.
///
/// An interval is the sum of its components. At least one component is
/// positive, which [`IntervalSpec::new`] and [`FromStr`] both enforce, so a
/// constructed interval always advances the aggregation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IntervalSpec {
    seconds: u64,
    minutes: u64,
    hours: u64,
    days: u64,
}

impl IntervalSpec {
    /// Creates a new interval from its components.
    ///
    /// # Errors
    ///
    /// Returns an error if every component is zero or the total overflows.
    pub fn new(seconds: u64, minutes: u64, hours: u64, days: u64) -> Result<Self, IntervalError> {
        let spec = Self {
            seconds,
            minutes,
            hours,
            days,
        };
        match spec.checked_total_seconds() {
            Some(0) => Err(IntervalError::Zero),
            Some(total) if i64::try_from(total).is_ok_and(|s| TimeDelta::try_seconds(s).is_some()) => {
                Ok(spec)
            }
            _ => Err(IntervalError::Overflow(spec.to_string())),
        }
    }

    /// Creates an interval of whole seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if `seconds` is zero.
    pub fn from_seconds(seconds: u64) -> Result<Self, IntervalError> {
        Self::new(seconds, 0, 0, 0)
    }

    /// Creates an interval of whole minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if `minutes` is zero.
    pub fn from_minutes(minutes: u64) -> Result<Self, IntervalError> {
        Self::new(0, minutes, 0, 0)
    }

    /// Returns the seconds component.
    #[must_use]
    pub const fn seconds(&self) -> u64 {
        self.seconds
    }

    /// Returns the minutes component.
    #[must_use]
    pub const fn minutes(&self) -> u64 {
        self.minutes
    }

    /// Returns the hours component.
    #[must_use]
    pub const fn hours(&self) -> u64 {
        self.hours
    }

    /// Returns the days component.
    #[must_use]
    pub const fn days(&self) -> u64 {
        self.days
    }

    /// Returns the total interval length in seconds.
    #[must_use]
    pub fn total_seconds(&self) -> u64 {
        // Validated at construction.
        self.checked_total_seconds().unwrap_or(u64::MAX)
    }

    /// Returns the interval as a time delta.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        i64::try_from(self.total_seconds())
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }

    fn checked_total_seconds(&self) -> Option<u64> {
        self.days
            .checked_mul(SECONDS_PER_DAY)?
            .checked_add(self.hours.checked_mul(SECONDS_PER_HOUR)?)?
            .checked_add(self.minutes.checked_mul(SECONDS_PER_MINUTE)?)?
            .checked_add(self.seconds)
    }
}

impl std::fmt::Display for IntervalSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts = [
            (self.days, 'd'),
            (self.hours, 'h'),
            (self.minutes, 'm'),
            (self.seconds, 's'),
        ];
        let mut wrote = false;
        for (value, unit) in parts {
            if value > 0 {
                write!(f, "{value}{unit}")?;
                wrote = true;
            }
        }
        if !wrote {
            write!(f, "0s")?;
        }
        Ok(())
    }
}

impl FromStr for IntervalSpec {
    type Err = IntervalError;

    /// Parses compound unit syntax such as `1d2h30m15s`, `90s`, or `4H`.
    ///
    /// Units must appear at most once each, largest first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_lowercase();
        if text.is_empty() {
            return Err(IntervalError::Syntax(s.to_string()));
        }

        let syntax = || IntervalError::Syntax(s.to_string());
        let units = ['d', 'h', 'm', 's'];
        let mut values = [0u64; 4];
        let mut next_unit = 0;
        let mut digits = String::new();

        for c in text.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            let slot = units[next_unit..]
                .iter()
                .position(|&u| u == c)
                .map(|p| p + next_unit)
                .ok_or_else(syntax)?;
            if digits.is_empty() {
                return Err(syntax());
            }
            values[slot] = digits
                .parse()
                .map_err(|_| IntervalError::Overflow(s.to_string()))?;
            digits.clear();
            next_unit = slot + 1;
        }

        if !digits.is_empty() {
            return Err(syntax());
        }

        let [days, hours, minutes, seconds] = values;
        Self::new(seconds, minutes, hours, days)
    }
}

impl TryFrom<String> for IntervalSpec {
    type Error = IntervalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<IntervalSpec> for String {
    fn from(value: IntervalSpec) -> Self {
        value.to_string()
    }
}
