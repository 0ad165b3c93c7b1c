//! Date type for price histories.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

use crate::error::{CoreError, CoreResult};

/// A calendar date for an observation.
///
/// Newtype wrapper around `chrono::NaiveDate`. Serializes as `YYYY-MM-DD`.
///
/// # Example
///
/// ```rust
/// use tailrisk_core::Date;
///
/// let date = Date::from_ymd(2024, 2, 28).unwrap();
/// assert_eq!(date.add_days(1).to_string(), "2024-02-29");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Earliest representable date.
    pub const MIN: Date = Date(NaiveDate::MIN);

    /// Latest representable date.
    pub const MAX: Date = Date(NaiveDate::MAX);

    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns today's date.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a (possibly negative) number of calendar days.
    ///
    /// # Panics
    ///
    /// Panics if the result falls outside [`Date::MIN`]..=[`Date::MAX`]; use
    /// [`Date::checked_add_days`] for offsets that come from user input.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a (possibly negative) number of calendar days.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is not representable.
    pub fn checked_add_days(&self, days: i64) -> CoreResult<Self> {
        chrono::Duration::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Date)
            .ok_or_else(|| {
                CoreError::invalid_date(format!("{self} offset by {days} days is out of range"))
            })
    }

    /// Calendar days from `self` to `other` (positive if `other` is later).
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl std::str::FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    fn sub(self, rhs: Date) -> Self::Output {
        rhs.days_between(&self)
    }
}
