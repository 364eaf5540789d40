//! Volatility surface abstractions.
//!
//! This module provides:
//! - [`VolatilitySurface`]: Generic trait for implied volatility lookups
//! - [`FlatVol`]: Constant volatility surface implementation

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Generic volatility surface trait.
///
/// Implementations return the implied volatility for a (strike, expiry)
/// query. Strike semantics (absolute level, moneyness) are the
/// implementation's concern.
pub trait VolatilitySurface<T: Float> {
    /// Returns the implied volatility for the given strike and expiry.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidMaturity` if `expiry < 0`.
    fn volatility(&self, strike: T, expiry: T) -> Result<T, MarketDataError>;
}

/// Flat volatility surface with a constant implied volatility.
///
/// The same volatility applies to all strike and expiry combinations.
///
/// # Example
///
/// ```
/// use calc_core::market_data::surfaces::{FlatVol, VolatilitySurface};
///
/// let surface = FlatVol::new(0.20_f64);
/// assert_eq!(surface.volatility(100.0, 1.0).unwrap(), 0.20);
/// assert_eq!(surface.volatility(80.0, 0.5).unwrap(), 0.20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatVol<T: Float> {
    /// The constant implied volatility
    sigma: T,
}

impl<T: Float> FlatVol<T> {
    /// Constructs a flat volatility surface.
    #[inline]
    pub fn new(sigma: T) -> Self {
        Self { sigma }
    }

    /// Returns the constant volatility.
    #[inline]
    pub fn sigma(&self) -> T {
        self.sigma
    }

    /// Returns a copy with the volatility shifted by `delta`.
    ///
    /// The receiver is untouched (copy-on-perturb).
    #[inline]
    pub fn shifted(&self, delta: T) -> Self {
        Self {
            sigma: self.sigma + delta,
        }
    }
}

impl<T: Float> VolatilitySurface<T> for FlatVol<T> {
    fn volatility(&self, _strike: T, expiry: T) -> Result<T, MarketDataError> {
        if expiry < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: expiry.to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.sigma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_volatility() {
        let surface = FlatVol::new(0.25_f64);
        assert_eq!(surface.volatility(80.0, 0.5).unwrap(), 0.25);
        assert_eq!(surface.volatility(120.0, 2.0).unwrap(), 0.25);
    }

    #[test]
    fn test_negative_expiry_rejected() {
        let surface = FlatVol::new(0.25_f64);
        assert!(matches!(
            surface.volatility(100.0, -1.0),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
    }

    #[test]
    fn test_shifted_does_not_mutate_original() {
        let surface = FlatVol::new(0.20_f64);
        let bumped = surface.shifted(0.05);
        assert_eq!(surface.sigma(), 0.20);
        assert!((bumped.sigma() - 0.25).abs() < 1e-12);
    }
}
