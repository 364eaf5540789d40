//! The calculation function capability contract.

use calc_core::reference::ReferenceData;
use calc_market::requirements::MarketDataRequirements;
use calc_market::resolved::ResolvedMarketData;
use calc_trades::Trade;

use crate::error::CalculationFailure;
use crate::results::CellValue;

/// A polymorphic calculation unit, registered per (product type,
/// measure) pair.
///
/// Exposes two capabilities that the engine invokes in separate phases:
///
/// - [`requirements`](Self::requirements) runs during the planning pass.
///   It must be pure: no market data access, no pricing, no side
///   effects, and the same trade must always yield the same set.
/// - [`calculate`](Self::calculate) runs during execution against the
///   immutable market data view for one scenario. Implementations are
///   invoked concurrently from worker threads, hence `Send + Sync`.
///
/// The engine treats implementations as opaque: product-specific pricing
/// lives entirely behind this trait.
pub trait CalculationFunction: Send + Sync {
    /// Returns the market data this function needs for `trade`.
    ///
    /// # Errors
    ///
    /// A [`CalculationFailure`] scoped to the cells using this function
    /// (e.g. the trade's data cannot support the measure at all).
    fn requirements(&self, trade: &Trade) -> Result<MarketDataRequirements, CalculationFailure>;

    /// Computes the measure value for `trade` against one scenario's
    /// market data.
    ///
    /// # Errors
    ///
    /// A [`CalculationFailure`] captured into exactly this cell.
    fn calculate(
        &self,
        trade: &Trade,
        market_data: &ResolvedMarketData,
        reference_data: &ReferenceData,
    ) -> Result<CellValue, CalculationFailure>;
}
