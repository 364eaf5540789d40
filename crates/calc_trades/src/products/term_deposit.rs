//! Fixed-rate term deposit product.

use calc_core::types::ids::CalendarId;
use calc_core::types::time::{Date, DayCount};
use calc_core::types::Currency;

use super::ProductError;

/// A fixed-rate term deposit.
///
/// The notional is placed at the start date and repaid with interest at
/// the end date. Interest accrues at the fixed rate under the deposit's
/// day count convention.
///
/// # Examples
///
/// ```
/// use calc_trades::products::TermDeposit;
/// use calc_core::types::{CalendarId, Currency, Date, DayCount};
///
/// let deposit = TermDeposit::new(
///     Currency::USD,
///     1_000_000.0,
///     0.025,
///     Date::from_ymd(2026, 1, 15).unwrap(),
///     Date::from_ymd(2026, 7, 15).unwrap(),
///     DayCount::Act360,
///     CalendarId::new("USNY"),
/// )
/// .unwrap();
///
/// // Maturity repayment: notional * (1 + r * tau)
/// let repayment = deposit.maturity_amount();
/// assert!((repayment - 1_012_569.44).abs() < 0.01);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TermDeposit {
    currency: Currency,
    notional: f64,
    rate: f64,
    start_date: Date,
    end_date: Date,
    day_count: DayCount,
    calendar: CalendarId,
}

impl TermDeposit {
    /// Creates a new term deposit.
    ///
    /// # Errors
    ///
    /// - `ProductError::InvalidDates` if `start_date >= end_date`
    /// - `ProductError::NonPositiveNotional` if `notional <= 0`
    pub fn new(
        currency: Currency,
        notional: f64,
        rate: f64,
        start_date: Date,
        end_date: Date,
        day_count: DayCount,
        calendar: CalendarId,
    ) -> Result<Self, ProductError> {
        if start_date >= end_date {
            return Err(ProductError::InvalidDates {
                start: start_date,
                end: end_date,
            });
        }
        if notional <= 0.0 {
            return Err(ProductError::NonPositiveNotional(notional));
        }
        Ok(Self {
            currency,
            notional,
            rate,
            start_date,
            end_date,
            day_count,
            calendar,
        })
    }

    /// Returns the deposit currency.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the notional amount.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns the fixed deposit rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the start (settlement) date.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Returns the end (maturity) date.
    #[inline]
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Returns the accrual day count convention.
    #[inline]
    pub fn day_count(&self) -> DayCount {
        self.day_count
    }

    /// Returns the payment calendar identifier.
    #[inline]
    pub fn calendar(&self) -> &CalendarId {
        &self.calendar
    }

    /// Returns the accrual year fraction from start to end.
    #[inline]
    pub fn accrual_fraction(&self) -> f64 {
        self.day_count.year_fraction(self.start_date, self.end_date)
    }

    /// Returns the amount repaid at maturity: `notional * (1 + r * tau)`.
    #[inline]
    pub fn maturity_amount(&self) -> f64 {
        self.notional * (1.0 + self.rate * self.accrual_fraction())
    }
}
