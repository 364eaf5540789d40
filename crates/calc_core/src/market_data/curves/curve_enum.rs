//! Static dispatch enum over concrete curve implementations.

use super::{FlatCurve, YieldCurve, ZeroCurve};
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Static dispatch enum wrapping concrete yield curve implementations.
///
/// Avoids trait objects in market data containers so snapshots stay
/// `Clone` and cheap to copy under scenario perturbation.
///
/// # Variants
///
/// - `Flat`: Constant rate yield curve
/// - `Zero`: Pillar-based zero rate curve
///
/// # Example
///
/// ```
/// use calc_core::market_data::curves::{CurveEnum, YieldCurve};
///
/// let curve = CurveEnum::flat(0.05_f64);
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CurveEnum<T: Float> {
    /// Flat (constant rate) yield curve
    Flat(FlatCurve<T>),
    /// Pillar-based zero rate curve
    Zero(ZeroCurve<T>),
}

impl<T: Float> CurveEnum<T> {
    /// Creates a flat curve variant.
    #[inline]
    pub fn flat(rate: T) -> Self {
        CurveEnum::Flat(FlatCurve::new(rate))
    }

    /// Creates a zero curve variant from pillar times and rates.
    ///
    /// # Errors
    ///
    /// Propagates [`ZeroCurve::new`] validation errors.
    pub fn zero(times: Vec<T>, rates: Vec<T>) -> Result<Self, MarketDataError> {
        Ok(CurveEnum::Zero(ZeroCurve::new(times, rates)?))
    }

    /// Returns a copy of the curve with all rates shifted in parallel by
    /// `delta`.
    ///
    /// The receiver is untouched (copy-on-perturb).
    pub fn parallel_shift(&self, delta: T) -> Self {
        match self {
            CurveEnum::Flat(c) => CurveEnum::Flat(c.shifted(delta)),
            CurveEnum::Zero(c) => CurveEnum::Zero(c.shifted(delta)),
        }
    }

    /// Returns the number of bumpable pillars.
    ///
    /// A flat curve has no pillars; bucketed sensitivities collapse to a
    /// single parallel bucket.
    pub fn pillar_count(&self) -> usize {
        match self {
            CurveEnum::Flat(_) => 0,
            CurveEnum::Zero(c) => c.pillar_count(),
        }
    }

    /// Returns the pillar times, empty for a flat curve.
    pub fn pillar_times(&self) -> Vec<T> {
        match self {
            CurveEnum::Flat(_) => Vec::new(),
            CurveEnum::Zero(c) => c.times().to_vec(),
        }
    }

    /// Returns a copy with only pillar `index` shifted by `delta`, or
    /// `None` if the curve has no such pillar.
    pub fn bumped_pillar(&self, index: usize, delta: T) -> Option<Self> {
        match self {
            CurveEnum::Flat(_) => None,
            CurveEnum::Zero(c) => c.bumped_pillar(index, delta).map(CurveEnum::Zero),
        }
    }
}

impl<T: Float> YieldCurve<T> for CurveEnum<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        match self {
            CurveEnum::Flat(c) => c.discount_factor(t),
            CurveEnum::Zero(c) => c.discount_factor(t),
        }
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        match self {
            CurveEnum::Flat(c) => c.zero_rate(t),
            CurveEnum::Zero(c) => c.zero_rate(t),
        }
    }

    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        match self {
            CurveEnum::Flat(c) => c.forward_rate(t1, t2),
            CurveEnum::Zero(c) => c.forward_rate(t1, t2),
        }
    }
}
