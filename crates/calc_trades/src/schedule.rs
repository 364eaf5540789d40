//! Payment schedule generation.
//!
//! Schedules are generated with unadjusted accrual dates; payment dates
//! are business-day adjusted at pricing time against a holiday calendar
//! from reference data.

use std::fmt;

use calc_core::types::time::{Date, DayCount};
use thiserror::Error;

/// Schedule generation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Start date is not strictly before the end date.
    #[error("Invalid schedule dates: start {start} must precede end {end}")]
    InvalidDates {
        /// Schedule start date
        start: Date,
        /// Schedule end date
        end: Date,
    },
}

/// Payment frequency for scheduled instruments.
///
/// # Examples
///
/// ```
/// use calc_trades::schedule::Frequency;
///
/// assert_eq!(Frequency::Quarterly.months_between_payments(), 3);
/// assert_eq!(Frequency::SemiAnnual.periods_per_year(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Frequency {
    /// Annual payments.
    Annual,
    /// Semi-annual payments.
    SemiAnnual,
    /// Quarterly payments.
    Quarterly,
    /// Monthly payments.
    Monthly,
}

impl Frequency {
    /// Returns the number of payment periods per year.
    #[inline]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Returns the number of months between payment dates.
    #[inline]
    pub fn months_between_payments(&self) -> i32 {
        match self {
            Frequency::Annual => 12,
            Frequency::SemiAnnual => 6,
            Frequency::Quarterly => 3,
            Frequency::Monthly => 1,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "SemiAnnual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        };
        write!(f, "{}", name)
    }
}

/// A single accrual period with an unadjusted payment date at its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulePeriod {
    /// Accrual start date (inclusive)
    start: Date,
    /// Accrual end date, also the unadjusted payment date
    end: Date,
}

impl SchedulePeriod {
    /// Creates a period from accrual start and end dates.
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Returns the accrual start date.
    #[inline]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Returns the accrual end date / unadjusted payment date.
    #[inline]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Returns the accrual year fraction under the given day count.
    pub fn year_fraction(&self, day_count: DayCount) -> f64 {
        day_count.year_fraction(self.start, self.end)
    }
}

/// An ordered collection of accrual periods.
///
/// # Examples
///
/// ```
/// use calc_trades::schedule::{Frequency, Schedule};
/// use calc_core::types::Date;
///
/// let schedule = Schedule::generate(
///     Date::from_ymd(2026, 1, 15).unwrap(),
///     Date::from_ymd(2028, 1, 15).unwrap(),
///     Frequency::SemiAnnual,
/// )
/// .unwrap();
///
/// assert_eq!(schedule.periods().len(), 4);
/// assert_eq!(schedule.end_date(), Date::from_ymd(2028, 1, 15).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    periods: Vec<SchedulePeriod>,
}

impl Schedule {
    /// Generates a schedule by stepping whole months from `start`.
    ///
    /// Boundaries are `start + k * months(frequency)`; a boundary past
    /// `end` is clamped so the final period is a short stub ending
    /// exactly at `end`.
    ///
    /// # Errors
    ///
    /// `ScheduleError::InvalidDates` if `start >= end`.
    pub fn generate(start: Date, end: Date, frequency: Frequency) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::InvalidDates { start, end });
        }

        let step = frequency.months_between_payments();
        let mut periods = Vec::new();
        let mut period_start = start;
        let mut k = 1;
        loop {
            let boundary = start.add_months(k * step);
            let period_end = if boundary >= end { end } else { boundary };
            periods.push(SchedulePeriod::new(period_start, period_end));
            if period_end == end {
                break;
            }
            period_start = period_end;
            k += 1;
        }

        Ok(Self { periods })
    }

    /// Returns the periods in accrual order.
    #[inline]
    pub fn periods(&self) -> &[SchedulePeriod] {
        &self.periods
    }

    /// Returns the first accrual start date.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.periods[0].start()
    }

    /// Returns the final accrual end date.
    #[inline]
    pub fn end_date(&self) -> Date {
        self.periods[self.periods.len() - 1].end()
    }
}
