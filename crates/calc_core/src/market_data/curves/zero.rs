//! Pillar-based zero rate curve.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Yield curve defined by zero rates at pillar times, linear in the zero
/// rate between pillars with flat extrapolation at both ends.
///
/// # Example
///
/// ```
/// use calc_core::market_data::curves::{YieldCurve, ZeroCurve};
///
/// let curve = ZeroCurve::new(
///     vec![0.5_f64, 1.0, 2.0, 5.0],
///     vec![0.02, 0.025, 0.03, 0.035],
/// )
/// .unwrap();
///
/// // On a pillar
/// assert!((curve.zero_rate(1.0).unwrap() - 0.025).abs() < 1e-12);
/// // Between pillars
/// assert!((curve.zero_rate(1.5).unwrap() - 0.0275).abs() < 1e-12);
/// // Flat extrapolation below the first pillar
/// assert!((curve.zero_rate(0.1).unwrap() - 0.02).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroCurve<T: Float> {
    /// Pillar times in years, strictly increasing, all positive
    times: Vec<T>,
    /// Continuously compounded zero rate at each pillar
    rates: Vec<T>,
}

impl<T: Float> ZeroCurve<T> {
    /// Constructs a zero curve from pillar times and rates.
    ///
    /// # Errors
    ///
    /// - `MarketDataError::InsufficientData` if fewer than two pillars are given
    /// - `MarketDataError::InvalidInput` if lengths differ, any time is
    ///   non-positive, or times are not strictly increasing
    pub fn new(times: Vec<T>, rates: Vec<T>) -> Result<Self, MarketDataError> {
        if times.len() < 2 {
            return Err(MarketDataError::InsufficientData {
                got: times.len(),
                need: 2,
            });
        }
        if times.len() != rates.len() {
            return Err(MarketDataError::InvalidInput(format!(
                "pillar count mismatch: {} times, {} rates",
                times.len(),
                rates.len()
            )));
        }
        if times[0] <= T::zero() {
            return Err(MarketDataError::InvalidInput(
                "pillar times must be positive".to_string(),
            ));
        }
        for window in times.windows(2) {
            if window[1] <= window[0] {
                return Err(MarketDataError::InvalidInput(
                    "pillar times must be strictly increasing".to_string(),
                ));
            }
        }
        Ok(Self { times, rates })
    }

    /// Returns the number of pillars.
    #[inline]
    pub fn pillar_count(&self) -> usize {
        self.times.len()
    }

    /// Returns the pillar times.
    #[inline]
    pub fn times(&self) -> &[T] {
        &self.times
    }

    /// Returns the zero rates at the pillars.
    #[inline]
    pub fn rates(&self) -> &[T] {
        &self.rates
    }

    /// Returns a copy of the curve with every pillar rate shifted by `delta`.
    pub fn shifted(&self, delta: T) -> Self {
        Self {
            times: self.times.clone(),
            rates: self.rates.iter().map(|&r| r + delta).collect(),
        }
    }

    /// Returns a copy of the curve with only pillar `index` shifted by `delta`.
    ///
    /// Returns `None` if `index` is out of range. Used for bucketed
    /// sensitivity calculations.
    pub fn bumped_pillar(&self, index: usize, delta: T) -> Option<Self> {
        if index >= self.rates.len() {
            return None;
        }
        let mut rates = self.rates.clone();
        rates[index] = rates[index] + delta;
        Some(Self {
            times: self.times.clone(),
            rates,
        })
    }

    /// Interpolated zero rate at `t`, with flat extrapolation.
    fn rate_at(&self, t: T) -> T {
        let n = self.times.len();
        if t <= self.times[0] {
            return self.rates[0];
        }
        if t >= self.times[n - 1] {
            return self.rates[n - 1];
        }
        // t is strictly inside (times[0], times[n-1])
        let mut i = 0;
        while self.times[i + 1] < t {
            i += 1;
        }
        let (t0, t1) = (self.times[i], self.times[i + 1]);
        let (r0, r1) = (self.rates[i], self.rates[i + 1]);
        let w = (t - t0) / (t1 - t0);
        r0 + w * (r1 - r0)
    }
}

impl<T: Float> YieldCurve<T> for ZeroCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        if t == T::zero() {
            return Ok(T::one());
        }
        Ok((-self.rate_at(t) * t).exp())
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.rate_at(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_curve() -> ZeroCurve<f64> {
        ZeroCurve::new(vec![0.5, 1.0, 2.0, 5.0], vec![0.02, 0.025, 0.03, 0.035]).unwrap()
    }

    #[test]
    fn test_new_requires_two_pillars() {
        let result = ZeroCurve::new(vec![1.0_f64], vec![0.03]);
        assert!(matches!(
            result,
            Err(MarketDataError::InsufficientData { got: 1, need: 2 })
        ));
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let result = ZeroCurve::new(vec![1.0_f64, 2.0], vec![0.03]);
        assert!(matches!(result, Err(MarketDataError::InvalidInput(_))));
    }

    #[test]
    fn test_new_rejects_non_positive_times() {
        let result = ZeroCurve::new(vec![0.0_f64, 1.0], vec![0.02, 0.03]);
        assert!(matches!(result, Err(MarketDataError::InvalidInput(_))));
    }

    #[test]
    fn test_new_rejects_unsorted_times() {
        let result = ZeroCurve::new(vec![1.0_f64, 0.5], vec![0.02, 0.03]);
        assert!(matches!(result, Err(MarketDataError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_rate_on_pillars() {
        let curve = test_curve();
        assert!((curve.zero_rate(0.5).unwrap() - 0.02).abs() < 1e-12);
        assert!((curve.zero_rate(5.0).unwrap() - 0.035).abs() < 1e-12);
    }

    #[test]
    fn test_zero_rate_interpolates() {
        let curve = test_curve();
        assert!((curve.zero_rate(1.5).unwrap() - 0.0275).abs() < 1e-12);
    }

    #[test]
    fn test_flat_extrapolation() {
        let curve = test_curve();
        assert!((curve.zero_rate(0.1).unwrap() - 0.02).abs() < 1e-12);
        assert!((curve.zero_rate(30.0).unwrap() - 0.035).abs() < 1e-12);
    }

    #[test]
    fn test_discount_factor_at_zero() {
        let curve = test_curve();
        assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_discount_factor_matches_rate() {
        let curve = test_curve();
        let df = curve.discount_factor(2.0).unwrap();
        assert!((df - (-0.03_f64 * 2.0).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_negative_maturity_rejected() {
        let curve = test_curve();
        assert!(curve.discount_factor(-0.5).is_err());
    }

    #[test]
    fn test_shifted_moves_all_pillars() {
        let curve = test_curve();
        let bumped = curve.shifted(0.01);
        assert!((bumped.zero_rate(0.5).unwrap() - 0.03).abs() < 1e-12);
        assert!((bumped.zero_rate(5.0).unwrap() - 0.045).abs() < 1e-12);
        // original untouched
        assert!((curve.zero_rate(0.5).unwrap() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_bumped_pillar() {
        let curve = test_curve();
        let bumped = curve.bumped_pillar(1, 0.0001).unwrap();
        assert!((bumped.rates()[1] - 0.0251).abs() < 1e-12);
        assert!((bumped.rates()[0] - 0.02).abs() < 1e-12);
        assert!(curve.bumped_pillar(4, 0.0001).is_none());
    }
}
