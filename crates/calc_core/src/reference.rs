//! Reference data: holiday calendars and security definitions.
//!
//! Reference data is static lookup data independent of market data. It is
//! built once by the caller, injected into the engine, and shared
//! read-only across runs and across concurrently executing calculations.

use std::collections::{BTreeSet, HashMap};

use thiserror::Error;

use crate::types::ids::{CalendarId, SecurityId};
use crate::types::time::Date;
use crate::types::Currency;

/// Reference data lookup errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceDataError {
    /// No calendar registered under the requested identifier.
    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    /// No security registered under the requested identifier.
    #[error("Security not found: {0}")]
    SecurityNotFound(String),
}

/// Holiday calendar: weekends plus an explicit holiday set.
///
/// # Examples
///
/// ```
/// use calc_core::reference::HolidayCalendar;
/// use calc_core::types::Date;
///
/// let jul4 = Date::from_ymd(2026, 7, 3).unwrap(); // observed
/// let calendar = HolidayCalendar::new().with_holiday(jul4);
///
/// assert!(!calendar.is_business_day(jul4));
/// // Next business day after the holiday (2026-07-03 is a Friday)
/// assert_eq!(
///     calendar.adjust_following(jul4),
///     Date::from_ymd(2026, 7, 6).unwrap()
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    /// Explicit non-business days in addition to weekends
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates a weekends-only calendar.
    pub fn new() -> Self {
        Self {
            holidays: BTreeSet::new(),
        }
    }

    /// Adds a holiday, builder style.
    pub fn with_holiday(mut self, date: Date) -> Self {
        self.holidays.insert(date);
        self
    }

    /// Adds multiple holidays, builder style.
    pub fn with_holidays(mut self, dates: impl IntoIterator<Item = Date>) -> Self {
        self.holidays.extend(dates);
        self
    }

    /// Returns whether `date` is an explicit holiday.
    pub fn is_holiday(&self, date: Date) -> bool {
        self.holidays.contains(&date)
    }

    /// Returns whether `date` is a business day (not a weekend, not a
    /// holiday).
    pub fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.is_holiday(date)
    }

    /// Adjusts `date` forward to the next business day (Following
    /// convention). A business day is returned unchanged.
    pub fn adjust_following(&self, date: Date) -> Date {
        let mut d = date;
        while !self.is_business_day(d) {
            d = d.add_days(1);
        }
        d
    }
}

/// Static definition of a security.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityDefinition {
    /// Security identifier
    id: SecurityId,
    /// Human-readable name
    name: String,
    /// Denomination currency
    currency: Currency,
}

impl SecurityDefinition {
    /// Creates a new security definition.
    pub fn new(id: SecurityId, name: impl Into<String>, currency: Currency) -> Self {
        Self {
            id,
            name: name.into(),
            currency,
        }
    }

    /// Returns the security identifier.
    pub fn id(&self) -> &SecurityId {
        &self.id
    }

    /// Returns the security name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the denomination currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }
}

/// Injected read-only store of reference data.
///
/// Constructed once by the caller, then shared across runs. The engine
/// never mutates reference data; `ReferenceData` is `Clone` so callers
/// that want to refresh it build a new instance.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    /// Holiday calendars by identifier
    calendars: HashMap<CalendarId, HolidayCalendar>,
    /// Security definitions by identifier
    securities: HashMap<SecurityId, SecurityDefinition>,
}

impl ReferenceData {
    /// Creates an empty reference data store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a calendar, builder style.
    pub fn with_calendar(mut self, id: CalendarId, calendar: HolidayCalendar) -> Self {
        self.calendars.insert(id, calendar);
        self
    }

    /// Registers a security definition, builder style.
    pub fn with_security(mut self, security: SecurityDefinition) -> Self {
        self.securities.insert(security.id().clone(), security);
        self
    }

    /// Returns the calendar registered under `id`, if any.
    pub fn calendar(&self, id: &CalendarId) -> Option<&HolidayCalendar> {
        self.calendars.get(id)
    }

    /// Returns the calendar registered under `id`, or an error naming it.
    pub fn calendar_or_err(&self, id: &CalendarId) -> Result<&HolidayCalendar, ReferenceDataError> {
        self.calendars
            .get(id)
            .ok_or_else(|| ReferenceDataError::CalendarNotFound(id.as_str().to_string()))
    }

    /// Returns the security registered under `id`, if any.
    pub fn security(&self, id: &SecurityId) -> Option<&SecurityDefinition> {
        self.securities.get(id)
    }

    /// Returns the security registered under `id`, or an error naming it.
    pub fn security_or_err(
        &self,
        id: &SecurityId,
    ) -> Result<&SecurityDefinition, ReferenceDataError> {
        self.securities
            .get(id)
            .ok_or_else(|| ReferenceDataError::SecurityNotFound(id.as_str().to_string()))
    }

    /// Returns the number of registered calendars.
    pub fn calendar_count(&self) -> usize {
        self.calendars.len()
    }

    /// Returns the number of registered securities.
    pub fn security_count(&self) -> usize {
        self.securities.len()
    }
}
