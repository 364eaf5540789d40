//! Fixed versus floating interest rate swap product.

use std::fmt;
use std::str::FromStr;

use calc_core::types::ids::{CalendarId, IndexId};
use calc_core::types::time::DayCount;
use calc_core::types::Currency;

use super::ProductError;
use crate::schedule::Schedule;

/// Which leg the party pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapDirection {
    /// Pay the fixed leg, receive the floating leg.
    PayFixed,
    /// Receive the fixed leg, pay the floating leg.
    ReceiveFixed,
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SwapDirection::PayFixed => "PayFixed",
            SwapDirection::ReceiveFixed => "ReceiveFixed",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SwapDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PayFixed" => Ok(SwapDirection::PayFixed),
            "ReceiveFixed" => Ok(SwapDirection::ReceiveFixed),
            other => Err(format!("unknown swap direction: {}", other)),
        }
    }
}

/// The fixed leg of a swap.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedLeg {
    schedule: Schedule,
    rate: f64,
    day_count: DayCount,
}

impl FixedLeg {
    /// Creates a fixed leg paying `rate` on the given schedule.
    pub fn new(schedule: Schedule, rate: f64, day_count: DayCount) -> Self {
        Self {
            schedule,
            rate,
            day_count,
        }
    }

    /// Returns the payment schedule.
    #[inline]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Returns the fixed rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the accrual day count convention.
    #[inline]
    pub fn day_count(&self) -> DayCount {
        self.day_count
    }
}

/// The floating leg of a swap, indexed to a benchmark rate.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingLeg {
    schedule: Schedule,
    index: IndexId,
    day_count: DayCount,
}

impl FloatingLeg {
    /// Creates a floating leg projecting the given index on the schedule.
    pub fn new(schedule: Schedule, index: IndexId, day_count: DayCount) -> Self {
        Self {
            schedule,
            index,
            day_count,
        }
    }

    /// Returns the payment schedule.
    #[inline]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Returns the benchmark index.
    #[inline]
    pub fn index(&self) -> &IndexId {
        &self.index
    }

    /// Returns the accrual day count convention.
    #[inline]
    pub fn day_count(&self) -> DayCount {
        self.day_count
    }
}

/// A vanilla fixed versus floating interest rate swap.
///
/// # Examples
///
/// ```
/// use calc_trades::products::{FixedLeg, FloatingLeg, InterestRateSwap, SwapDirection};
/// use calc_trades::schedule::{Frequency, Schedule};
/// use calc_core::types::{CalendarId, Currency, Date, DayCount, IndexId};
///
/// let start = Date::from_ymd(2026, 1, 15).unwrap();
/// let end = Date::from_ymd(2031, 1, 15).unwrap();
///
/// let fixed = FixedLeg::new(
///     Schedule::generate(start, end, Frequency::Annual).unwrap(),
///     0.03,
///     DayCount::Thirty360,
/// );
/// let floating = FloatingLeg::new(
///     Schedule::generate(start, end, Frequency::SemiAnnual).unwrap(),
///     IndexId::new("USD-SOFR"),
///     DayCount::Act360,
/// );
///
/// let swap = InterestRateSwap::new(
///     1_000_000.0,
///     Currency::USD,
///     SwapDirection::PayFixed,
///     fixed,
///     floating,
///     CalendarId::new("USNY"),
/// )
/// .unwrap();
///
/// assert_eq!(swap.notional(), 1_000_000.0);
/// assert_eq!(swap.floating_leg().index().as_str(), "USD-SOFR");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InterestRateSwap {
    notional: f64,
    currency: Currency,
    direction: SwapDirection,
    fixed_leg: FixedLeg,
    floating_leg: FloatingLeg,
    calendar: CalendarId,
}

impl InterestRateSwap {
    /// Creates a new swap.
    ///
    /// # Errors
    ///
    /// `ProductError::NonPositiveNotional` if `notional <= 0`.
    pub fn new(
        notional: f64,
        currency: Currency,
        direction: SwapDirection,
        fixed_leg: FixedLeg,
        floating_leg: FloatingLeg,
        calendar: CalendarId,
    ) -> Result<Self, ProductError> {
        if notional <= 0.0 {
            return Err(ProductError::NonPositiveNotional(notional));
        }
        Ok(Self {
            notional,
            currency,
            direction,
            fixed_leg,
            floating_leg,
            calendar,
        })
    }

    /// Returns the notional amount.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns the swap currency.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the pay/receive direction.
    #[inline]
    pub fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Returns the fixed leg.
    #[inline]
    pub fn fixed_leg(&self) -> &FixedLeg {
        &self.fixed_leg
    }

    /// Returns the floating leg.
    #[inline]
    pub fn floating_leg(&self) -> &FloatingLeg {
        &self.floating_leg
    }

    /// Returns the payment calendar identifier.
    #[inline]
    pub fn calendar(&self) -> &CalendarId {
        &self.calendar
    }

    /// Sign applied to (floating PV - fixed PV) for this direction.
    #[inline]
    pub fn direction_sign(&self) -> f64 {
        match self.direction {
            SwapDirection::PayFixed => 1.0,
            SwapDirection::ReceiveFixed => -1.0,
        }
    }
}
