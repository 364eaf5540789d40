//! Time types and day count conventions for financial calculations.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `DayCount`: Industry-standard day count conventions
//! - Year fraction calculations for accruals and curve lookups
//!
//! # Examples
//!
//! ```
//! use calc_core::types::time::{Date, DayCount};
//!
//! let start = Date::from_ymd(2026, 1, 15).unwrap();
//! let end = Date::from_ymd(2026, 7, 15).unwrap();
//!
//! // Calculate year fraction using ACT/360
//! let yf = DayCount::Act360.year_fraction(start, end);
//! assert!((yf - 181.0 / 360.0).abs() < 1e-12);
//! ```

use chrono::{Datelike, Months, NaiveDate, Weekday};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 serialisation and the date arithmetic needed for
/// schedule generation and curve time calculations.
///
/// # Examples
///
/// ```
/// use calc_core::types::time::Date;
///
/// let date = Date::from_ymd(2026, 6, 15).unwrap();
/// assert_eq!(date.year(), 2026);
/// assert_eq!(date.month(), 6);
/// assert_eq!(date.day(), 15);
///
/// // Parse from ISO 8601 string
/// let parsed: Date = "2026-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// // Days between dates
/// let start = Date::from_ymd(2026, 1, 1).unwrap();
/// let end = Date::from_ymd(2026, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Arguments
    /// * `year` - Year (e.g., 2026)
    /// * `month` - Month (1-12)
    /// * `day` - Day (1-31, depending on month)
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns the year component.
    #[inline]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[inline]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day-of-month component (1-31).
    #[inline]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns a new date offset by the given number of calendar days.
    ///
    /// Negative offsets move backwards in time.
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Returns a new date offset by the given number of calendar months.
    ///
    /// The day-of-month is clamped to the end of the target month
    /// (e.g., 31 January + 1 month = 28/29 February).
    pub fn add_months(&self, months: i32) -> Self {
        let shifted = if months >= 0 {
            self.0 + Months::new(months as u32)
        } else {
            self.0 - Months::new((-months) as u32)
        };
        Date(shifted)
    }

    /// Returns whether this date falls on a Saturday or Sunday.
    #[inline]
    pub fn is_weekend(&self) -> bool {
        matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of calendar days between two dates.
    fn sub(self, rhs: Self) -> i64 {
        (self.0 - rhs.0).num_days()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("{}: {}", s, e)))
    }
}

/// Day count conventions for year fraction calculations.
///
/// # Variants
/// - `Act360`: Actual days over 360
/// - `Act365Fixed`: Actual days over 365
/// - `Thirty360`: 30/360 with day-of-month capped at 30
///
/// # Examples
///
/// ```
/// use calc_core::types::time::{Date, DayCount};
///
/// let start = Date::from_ymd(2026, 1, 15).unwrap();
/// let end = Date::from_ymd(2026, 7, 15).unwrap();
///
/// // 30/360 gives exactly half a year for a six-month period
/// let yf = DayCount::Thirty360.year_fraction(start, end);
/// assert!((yf - 0.5).abs() < 1e-12);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DayCount {
    /// Actual/360: actual days divided by 360.
    Act360,
    /// Actual/365 Fixed: actual days divided by 365.
    Act365Fixed,
    /// 30/360: months count 30 days, day-of-month capped at 30.
    Thirty360,
}

impl DayCount {
    /// Computes the year fraction between two dates under this convention.
    ///
    /// A negative fraction is returned when `end` precedes `start`.
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        match self {
            DayCount::Act360 => (end - start) as f64 / 360.0,
            DayCount::Act365Fixed => (end - start) as f64 / 365.0,
            DayCount::Thirty360 => {
                let d1 = start.day().min(30) as i64;
                let d2 = end.day().min(30) as i64;
                let months = (end.year() as i64 - start.year() as i64) * 12
                    + (end.month() as i64 - start.month() as i64);
                (months * 30 + d2 - d1) as f64 / 360.0
            }
        }
    }
}

impl fmt::Display for DayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayCount::Act360 => "ACT/360",
            DayCount::Act365Fixed => "ACT/365F",
            DayCount::Thirty360 => "30/360",
        };
        write!(f, "{}", name)
    }
}
