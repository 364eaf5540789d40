//! Engine error types.
//!
//! Two distinct severities exist, mirroring the propagation policy:
//! [`EngineError`] is fatal to a run and surfaced before any execution;
//! [`CalculationFailure`] is always recovered locally into the results
//! grid and never aborts sibling cells.

use calc_core::market_data::MarketDataError;
use calc_trades::products::ProductType;
use thiserror::Error;

use crate::measure::Measure;

/// Setup errors fatal to a run.
///
/// Surfaced immediately, before requirements collection or any cell
/// execution begins.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The trade list was empty.
    #[error("no trades supplied to the run")]
    EmptyTrades,

    /// The column list was empty.
    #[error("no columns supplied to the run")]
    EmptyColumns,

    /// The runner was configured with a zero-sized worker pool.
    #[error("worker pool requires at least one thread")]
    ZeroThreads,

    /// The worker pool could not be built.
    #[error("failed to build worker pool: {0}")]
    PoolBuild(String),
}

/// A structured, cell-scoped failure.
///
/// Captured into the results grid for exactly the (trade, column) cell
/// that produced it; the run always continues.
///
/// # Variants
///
/// - `UnsupportedCombination`: no function registered for the pair
/// - `MissingMarketData`: a requirement was unresolved or a lookup failed
/// - `Calculation`: the pricing function reported a computational error
/// - `InvalidTrade`: the trade's data is unusable for this measure
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationFailure {
    /// No function registered for this (product type, measure) pair.
    #[error("no function registered for product type {product_type} and measure {measure}")]
    UnsupportedCombination {
        /// The trade's product type
        product_type: ProductType,
        /// The requested measure
        measure: Measure,
    },

    /// Required market data was unresolved or missing.
    #[error("missing market data: {0}")]
    MissingMarketData(String),

    /// The pricing function reported a computational error.
    #[error("calculation failed: {0}")]
    Calculation(String),

    /// The trade's data is unusable for this measure.
    #[error("invalid trade: {0}")]
    InvalidTrade(String),
}

impl From<MarketDataError> for CalculationFailure {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::CurveNotFound { .. }
            | MarketDataError::FxRateNotFound { .. }
            | MarketDataError::FixingsNotFound { .. }
            | MarketDataError::MissingFixing { .. }
            | MarketDataError::SurfaceNotFound { .. } => {
                CalculationFailure::MissingMarketData(err.to_string())
            }
            other => CalculationFailure::Calculation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display() {
        assert_eq!(
            EngineError::EmptyTrades.to_string(),
            "no trades supplied to the run"
        );
        assert_eq!(
            EngineError::PoolBuild("io error".to_string()).to_string(),
            "failed to build worker pool: io error"
        );
    }

    #[test]
    fn test_unsupported_combination_display() {
        let failure = CalculationFailure::UnsupportedCombination {
            product_type: ProductType::Swap,
            measure: Measure::Pv01,
        };
        assert_eq!(
            failure.to_string(),
            "no function registered for product type Swap and measure PV01"
        );
    }

    #[test]
    fn test_market_data_error_mapping() {
        let err = MarketDataError::CurveNotFound {
            name: "USD discount".to_string(),
        };
        let failure: CalculationFailure = err.into();
        assert!(matches!(failure, CalculationFailure::MissingMarketData(_)));

        let err = MarketDataError::InvalidMaturity { t: -1.0 };
        let failure: CalculationFailure = err.into();
        assert!(matches!(failure, CalculationFailure::Calculation(_)));
    }

    #[test]
    fn test_failures_are_comparable() {
        let a = CalculationFailure::MissingMarketData("x".to_string());
        assert_eq!(a, a.clone());
    }
}
