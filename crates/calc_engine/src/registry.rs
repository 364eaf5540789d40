//! Registry mapping (product type, measure) pairs to calculation
//! functions.

use std::collections::HashMap;
use std::sync::Arc;

use calc_trades::products::ProductType;

use crate::error::CalculationFailure;
use crate::function::CalculationFunction;
use crate::measure::Measure;

/// Dispatch table keyed by (product type, measure).
///
/// Lookup is a pure mapping with no fallback or inheritance walk: each
/// product type must have an explicit function registered per supported
/// measure. Registration happens before any run; during runs the
/// registry is read-only and concurrent lookups need no locking.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use calc_engine::{CalculationFunction, Measure, MeasureRegistry};
/// use calc_trades::products::ProductType;
///
/// # fn function() -> Arc<dyn CalculationFunction> { unimplemented!() }
/// let mut registry = MeasureRegistry::new();
/// registry.register(ProductType::TermDeposit, Measure::PresentValue, function());
/// assert!(registry.lookup(ProductType::TermDeposit, Measure::PresentValue).is_some());
/// assert!(registry.lookup(ProductType::Swap, Measure::PresentValue).is_none());
/// ```
#[derive(Clone, Default)]
pub struct MeasureRegistry {
    functions: HashMap<(ProductType, Measure), Arc<dyn CalculationFunction>>,
}

impl MeasureRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Registers a function for a (product type, measure) pair.
    ///
    /// Re-registering a pair replaces the previous function.
    pub fn register(
        &mut self,
        product_type: ProductType,
        measure: Measure,
        function: Arc<dyn CalculationFunction>,
    ) {
        self.functions.insert((product_type, measure), function);
    }

    /// Convenience wrapper registering an owned function.
    pub fn register_fn<F>(&mut self, product_type: ProductType, measure: Measure, function: F)
    where
        F: CalculationFunction + 'static,
    {
        self.register(product_type, measure, Arc::new(function));
    }

    /// Looks up the function for a pair, if registered.
    pub fn lookup(
        &self,
        product_type: ProductType,
        measure: Measure,
    ) -> Option<&Arc<dyn CalculationFunction>> {
        self.functions.get(&(product_type, measure))
    }

    /// Looks up the function for a pair, or reports the unsupported
    /// combination.
    pub fn lookup_or_err(
        &self,
        product_type: ProductType,
        measure: Measure,
    ) -> Result<&Arc<dyn CalculationFunction>, CalculationFailure> {
        self.lookup(product_type, measure)
            .ok_or(CalculationFailure::UnsupportedCombination {
                product_type,
                measure,
            })
    }

    /// Returns the measures registered for a product type, sorted.
    pub fn registered_measures(&self, product_type: ProductType) -> Vec<Measure> {
        let mut measures: Vec<Measure> = self
            .functions
            .keys()
            .filter(|(pt, _)| *pt == product_type)
            .map(|(_, m)| *m)
            .collect();
        measures.sort();
        measures
    }

    /// Returns the number of registered pairs.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl std::fmt::Debug for MeasureRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.functions.keys().collect();
        keys.sort();
        f.debug_struct("MeasureRegistry").field("keys", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::reference::ReferenceData;
    use calc_market::requirements::MarketDataRequirements;
    use calc_market::resolved::ResolvedMarketData;
    use calc_trades::Trade;

    use crate::results::CellValue;

    struct StubFunction;

    impl CalculationFunction for StubFunction {
        fn requirements(
            &self,
            _trade: &Trade,
        ) -> Result<MarketDataRequirements, CalculationFailure> {
            Ok(MarketDataRequirements::new())
        }

        fn calculate(
            &self,
            _trade: &Trade,
            _market_data: &ResolvedMarketData,
            _reference_data: &ReferenceData,
        ) -> Result<CellValue, CalculationFailure> {
            Ok(CellValue::Rate(42.0))
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = MeasureRegistry::new();
        assert!(registry.is_empty());

        registry.register_fn(ProductType::TermDeposit, Measure::PresentValue, StubFunction);
        assert_eq!(registry.len(), 1);
        assert!(registry
            .lookup(ProductType::TermDeposit, Measure::PresentValue)
            .is_some());
        assert!(registry
            .lookup(ProductType::TermDeposit, Measure::ParRate)
            .is_none());
        assert!(registry
            .lookup(ProductType::Swap, Measure::PresentValue)
            .is_none());
    }

    #[test]
    fn test_lookup_or_err_names_the_pair() {
        let registry = MeasureRegistry::new();
        let err = registry
            .lookup_or_err(ProductType::Swap, Measure::Pv01)
            .err()
            .unwrap();
        assert_eq!(
            err,
            CalculationFailure::UnsupportedCombination {
                product_type: ProductType::Swap,
                measure: Measure::Pv01,
            }
        );
    }

    #[test]
    fn test_reregistration_replaces() {
        let mut registry = MeasureRegistry::new();
        registry.register_fn(ProductType::TermDeposit, Measure::PresentValue, StubFunction);
        registry.register_fn(ProductType::TermDeposit, Measure::PresentValue, StubFunction);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registered_measures_sorted() {
        let mut registry = MeasureRegistry::new();
        registry.register_fn(ProductType::TermDeposit, Measure::CashFlows, StubFunction);
        registry.register_fn(ProductType::TermDeposit, Measure::PresentValue, StubFunction);
        let measures = registry.registered_measures(ProductType::TermDeposit);
        assert_eq!(measures, vec![Measure::PresentValue, Measure::CashFlows]);
        assert!(registry.registered_measures(ProductType::Swap).is_empty());
    }
}
