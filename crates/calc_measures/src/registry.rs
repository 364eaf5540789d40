//! Standard registry wiring for the built-in products.

use calc_engine::{Measure, MeasureRegistry};
use calc_trades::products::ProductType;

use crate::swap::{SwapBucketedPv01, SwapCashFlows, SwapParRate, SwapPresentValue, SwapPv01};
use crate::term_deposit::{
    TermDepositBucketedPv01, TermDepositCashFlows, TermDepositParRate, TermDepositPresentValue,
    TermDepositPv01,
};

/// Builds a registry with every standard (product type, measure) pair.
///
/// Callers extend the returned registry with their own functions before
/// constructing a runner; registration after the first run is not
/// supported.
///
/// # Examples
///
/// ```
/// use calc_engine::Measure;
/// use calc_measures::standard_registry;
/// use calc_trades::products::ProductType;
///
/// let registry = standard_registry();
/// assert!(registry
///     .lookup(ProductType::TermDeposit, Measure::PresentValue)
///     .is_some());
/// assert!(registry
///     .lookup(ProductType::Swap, Measure::CashFlows)
///     .is_some());
/// ```
pub fn standard_registry() -> MeasureRegistry {
    let mut registry = MeasureRegistry::new();

    registry.register_fn(
        ProductType::TermDeposit,
        Measure::PresentValue,
        TermDepositPresentValue,
    );
    registry.register_fn(ProductType::TermDeposit, Measure::ParRate, TermDepositParRate);
    registry.register_fn(ProductType::TermDeposit, Measure::Pv01, TermDepositPv01);
    registry.register_fn(
        ProductType::TermDeposit,
        Measure::BucketedPv01,
        TermDepositBucketedPv01,
    );
    registry.register_fn(
        ProductType::TermDeposit,
        Measure::CashFlows,
        TermDepositCashFlows,
    );

    registry.register_fn(ProductType::Swap, Measure::PresentValue, SwapPresentValue);
    registry.register_fn(ProductType::Swap, Measure::ParRate, SwapParRate);
    registry.register_fn(ProductType::Swap, Measure::Pv01, SwapPv01);
    registry.register_fn(ProductType::Swap, Measure::BucketedPv01, SwapBucketedPv01);
    registry.register_fn(ProductType::Swap, Measure::CashFlows, SwapCashFlows);

    registry
}
