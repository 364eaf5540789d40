//! Historical fixing series for floating rate indices.

use std::collections::BTreeMap;

use crate::types::time::Date;

/// Time series of observed index fixings, ordered by date.
///
/// Floating legs consume fixings for accrual periods that started before
/// the valuation date; future periods are projected off forward curves
/// instead.
///
/// # Examples
///
/// ```
/// use calc_core::market_data::FixingSeries;
/// use calc_core::types::Date;
///
/// let mut series = FixingSeries::new();
/// series.insert(Date::from_ymd(2026, 1, 14).unwrap(), 0.0435);
/// series.insert(Date::from_ymd(2026, 1, 15).unwrap(), 0.0437);
///
/// let date = Date::from_ymd(2026, 1, 15).unwrap();
/// assert_eq!(series.get(date), Some(0.0437));
/// assert_eq!(series.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixingSeries {
    /// Observed fixings keyed by observation date
    points: BTreeMap<Date, f64>,
}

impl FixingSeries {
    /// Creates an empty fixing series.
    pub fn new() -> Self {
        Self {
            points: BTreeMap::new(),
        }
    }

    /// Inserts an observation, replacing any existing fixing on that date.
    pub fn insert(&mut self, date: Date, rate: f64) {
        self.points.insert(date, rate);
    }

    /// Builder-style insert for test and setup code.
    pub fn with_fixing(mut self, date: Date, rate: f64) -> Self {
        self.insert(date, rate);
        self
    }

    /// Returns the fixing observed on `date`, if any.
    pub fn get(&self, date: Date) -> Option<f64> {
        self.points.get(&date).copied()
    }

    /// Returns the most recent fixing on or before `date`, if any.
    pub fn latest_on_or_before(&self, date: Date) -> Option<(Date, f64)> {
        self.points
            .range(..=date)
            .next_back()
            .map(|(&d, &r)| (d, r))
    }

    /// Returns the number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over observations in date order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.points.iter().map(|(&d, &r)| (d, r))
    }
}
