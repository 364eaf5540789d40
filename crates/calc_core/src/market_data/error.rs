//! Market data error types.

use crate::types::time::Date;
use thiserror::Error;

/// Market data operation errors.
///
/// Covers failed lookups against bound market data as well as invalid
/// queries against curves and surfaces.
///
/// # Variants
///
/// - `InvalidMaturity`: Negative time to maturity
/// - `CurveNotFound`: No curve bound under the requested key
/// - `FxRateNotFound`: No FX rate bound for the requested pair
/// - `FixingsNotFound`: No fixing series bound for the requested index
/// - `MissingFixing`: Fixing series has no observation for a date
/// - `SurfaceNotFound`: No volatility surface bound under the key
/// - `InsufficientData`: Not enough points to construct a curve
/// - `InvalidInput`: General invalid input
///
/// # Examples
///
/// ```
/// use calc_core::market_data::MarketDataError;
///
/// let err = MarketDataError::CurveNotFound { name: "USD-OIS".to_string() };
/// assert_eq!(format!("{}", err), "Curve not found: USD-OIS");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid maturity (negative time).
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// No curve bound under the requested key.
    #[error("Curve not found: {name}")]
    CurveNotFound {
        /// The requested curve key
        name: String,
    },

    /// No FX rate bound for the requested pair.
    #[error("FX rate not found: {pair}")]
    FxRateNotFound {
        /// The requested currency pair
        pair: String,
    },

    /// No fixing series bound for the requested index.
    #[error("Fixing series not found: {index}")]
    FixingsNotFound {
        /// The requested index name
        index: String,
    },

    /// Fixing series has no observation for the requested date.
    #[error("Missing fixing for {index} on {date}")]
    MissingFixing {
        /// The index name
        index: String,
        /// The observation date with no fixing
        date: Date,
    },

    /// No volatility surface bound under the requested key.
    #[error("Volatility surface not found: {name}")]
    SurfaceNotFound {
        /// The requested surface key
        name: String,
    },

    /// Insufficient data points for curve construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
