//! Resolved market data views handed to calculation functions.

use std::collections::{BTreeMap, HashMap};

use calc_core::market_data::curves::CurveEnum;
use calc_core::market_data::surfaces::FlatVol;
use calc_core::market_data::{FixingSeries, MarketDataError};
use calc_core::types::ids::{IndexId, SurfaceId};
use calc_core::types::time::{Date, DayCount};
use calc_core::types::{Currency, CurrencyPair};

use crate::requirements::MarketDataRequirement;
use crate::resolver::ResolutionError;

/// Market data bound to abstract requirement keys for one scenario.
///
/// Calculation functions query by the same keys they declared as
/// requirements: discount curve by currency, forward curve by index,
/// and so on. The view is immutable once built and safely shared across
/// concurrently executing calculations.
///
/// # Examples
///
/// ```
/// use calc_market::resolved::ResolvedMarketData;
/// use calc_core::market_data::curves::{CurveEnum, YieldCurve};
/// use calc_core::types::{Currency, Date};
///
/// let data = ResolvedMarketData::new(Date::from_ymd(2026, 1, 15).unwrap())
///     .with_discount_curve(Currency::USD, CurveEnum::flat(0.03));
///
/// let curve = data.discount_curve(Currency::USD).unwrap();
/// assert!(curve.discount_factor(1.0).is_ok());
/// assert!(data.discount_curve(Currency::EUR).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ResolvedMarketData {
    valuation_date: Date,
    discount_curves: HashMap<Currency, CurveEnum<f64>>,
    forward_curves: HashMap<IndexId, CurveEnum<f64>>,
    fx_rates: HashMap<CurrencyPair, f64>,
    fixings: HashMap<IndexId, FixingSeries>,
    surfaces: HashMap<SurfaceId, FlatVol<f64>>,
}

impl ResolvedMarketData {
    /// Creates an empty view for the given valuation date.
    pub fn new(valuation_date: Date) -> Self {
        Self {
            valuation_date,
            discount_curves: HashMap::new(),
            forward_curves: HashMap::new(),
            fx_rates: HashMap::new(),
            fixings: HashMap::new(),
            surfaces: HashMap::new(),
        }
    }

    /// Returns the valuation date.
    #[inline]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Returns the curve time (in years) for a date, measured from the
    /// valuation date under Act/365F.
    ///
    /// This is the single time convention used for all curve lookups.
    pub fn time_from_valuation(&self, date: Date) -> f64 {
        DayCount::Act365Fixed.year_fraction(self.valuation_date, date)
    }

    /// Binds a discount curve for a currency, builder style.
    pub fn with_discount_curve(mut self, currency: Currency, curve: CurveEnum<f64>) -> Self {
        self.insert_discount_curve(currency, curve);
        self
    }

    /// Binds a forward curve for an index, builder style.
    pub fn with_forward_curve(mut self, index: IndexId, curve: CurveEnum<f64>) -> Self {
        self.insert_forward_curve(index, curve);
        self
    }

    /// Binds an FX rate for a pair, builder style.
    pub fn with_fx_rate(mut self, pair: CurrencyPair, rate: f64) -> Self {
        self.insert_fx_rate(pair, rate);
        self
    }

    /// Binds a fixing series for an index, builder style.
    pub fn with_fixings(mut self, index: IndexId, series: FixingSeries) -> Self {
        self.insert_fixings(index, series);
        self
    }

    /// Binds a volatility surface, builder style.
    pub fn with_surface(mut self, id: SurfaceId, surface: FlatVol<f64>) -> Self {
        self.insert_surface(id, surface);
        self
    }

    /// Binds a discount curve in place.
    pub(crate) fn insert_discount_curve(&mut self, currency: Currency, curve: CurveEnum<f64>) {
        self.discount_curves.insert(currency, curve);
    }

    /// Binds a forward curve in place.
    pub(crate) fn insert_forward_curve(&mut self, index: IndexId, curve: CurveEnum<f64>) {
        self.forward_curves.insert(index, curve);
    }

    /// Binds an FX rate in place.
    pub(crate) fn insert_fx_rate(&mut self, pair: CurrencyPair, rate: f64) {
        self.fx_rates.insert(pair, rate);
    }

    /// Binds a fixing series in place.
    pub(crate) fn insert_fixings(&mut self, index: IndexId, series: FixingSeries) {
        self.fixings.insert(index, series);
    }

    /// Binds a volatility surface in place.
    pub(crate) fn insert_surface(&mut self, id: SurfaceId, surface: FlatVol<f64>) {
        self.surfaces.insert(id, surface);
    }

    /// Returns the discount curve bound for `currency`.
    pub fn discount_curve(&self, currency: Currency) -> Result<&CurveEnum<f64>, MarketDataError> {
        self.discount_curves
            .get(&currency)
            .ok_or_else(|| MarketDataError::CurveNotFound {
                name: format!("{} discount", currency),
            })
    }

    /// Returns the forward curve bound for `index`.
    pub fn forward_curve(&self, index: &IndexId) -> Result<&CurveEnum<f64>, MarketDataError> {
        self.forward_curves
            .get(index)
            .ok_or_else(|| MarketDataError::CurveNotFound {
                name: format!("{} forward", index),
            })
    }

    /// Returns the FX rate bound for `pair`.
    pub fn fx_rate(&self, pair: CurrencyPair) -> Result<f64, MarketDataError> {
        self.fx_rates
            .get(&pair)
            .copied()
            .ok_or_else(|| MarketDataError::FxRateNotFound {
                pair: pair.to_string(),
            })
    }

    /// Returns the fixing series bound for `index`.
    pub fn fixings(&self, index: &IndexId) -> Result<&FixingSeries, MarketDataError> {
        self.fixings
            .get(index)
            .ok_or_else(|| MarketDataError::FixingsNotFound {
                index: index.as_str().to_string(),
            })
    }

    /// Returns the volatility surface bound under `id`.
    pub fn surface(&self, id: &SurfaceId) -> Result<&FlatVol<f64>, MarketDataError> {
        self.surfaces
            .get(id)
            .ok_or_else(|| MarketDataError::SurfaceNotFound {
                name: id.as_str().to_string(),
            })
    }

    /// Applies `f` to the discount curve bound for `currency`, replacing
    /// the binding with the result. No-op if the currency is unbound.
    pub(crate) fn map_discount_curve(
        &mut self,
        currency: Currency,
        f: impl FnOnce(&CurveEnum<f64>) -> CurveEnum<f64>,
    ) {
        if let Some(curve) = self.discount_curves.get(&currency) {
            let replaced = f(curve);
            self.discount_curves.insert(currency, replaced);
        }
    }

    /// Applies `f` to the forward curve bound for `index`, replacing the
    /// binding with the result. No-op if the index is unbound.
    pub(crate) fn map_forward_curve(
        &mut self,
        index: &IndexId,
        f: impl FnOnce(&CurveEnum<f64>) -> CurveEnum<f64>,
    ) {
        if let Some(curve) = self.forward_curves.get(index) {
            let replaced = f(curve);
            self.forward_curves.insert(index.clone(), replaced);
        }
    }

    /// Scales the FX rate bound for `pair` by `factor`. No-op if unbound.
    pub(crate) fn scale_fx_rate(&mut self, pair: CurrencyPair, factor: f64) {
        if let Some(rate) = self.fx_rates.get_mut(&pair) {
            *rate *= factor;
        }
    }

    /// Shifts the surface bound under `id` by `delta`. No-op if unbound.
    pub(crate) fn shift_surface(&mut self, id: &SurfaceId, delta: f64) {
        if let Some(surface) = self.surfaces.get_mut(id) {
            *surface = surface.shifted(delta);
        }
    }
}

/// One resolved market data view per scenario, plus any requirements the
/// rules or snapshot could not satisfy.
///
/// Single-scenario runs hold exactly one view, so single- and
/// multi-scenario results share one shape downstream.
#[derive(Debug, Clone)]
pub struct ScenarioMarketData {
    scenario_names: Vec<String>,
    scenarios: Vec<ResolvedMarketData>,
    unresolved: BTreeMap<MarketDataRequirement, ResolutionError>,
}

impl ScenarioMarketData {
    /// Wraps pre-built per-scenario views.
    ///
    /// # Panics
    ///
    /// Panics if `names` and `scenarios` differ in length or are empty.
    pub fn from_scenarios(
        names: Vec<String>,
        scenarios: Vec<ResolvedMarketData>,
        unresolved: BTreeMap<MarketDataRequirement, ResolutionError>,
    ) -> Self {
        assert!(
            !scenarios.is_empty(),
            "ScenarioMarketData needs at least one scenario"
        );
        assert_eq!(
            names.len(),
            scenarios.len(),
            "scenario name/view count mismatch"
        );
        Self {
            scenario_names: names,
            scenarios,
            unresolved,
        }
    }

    /// Wraps a single pre-built view as the only scenario.
    pub fn single(data: ResolvedMarketData) -> Self {
        Self::from_scenarios(vec!["Base".to_string()], vec![data], BTreeMap::new())
    }

    /// Returns the number of scenarios.
    pub fn scenario_count(&self) -> usize {
        self.scenarios.len()
    }

    /// Returns the view for scenario `index`, if in range.
    pub fn scenario(&self, index: usize) -> Option<&ResolvedMarketData> {
        self.scenarios.get(index)
    }

    /// Iterates over per-scenario views in scenario order.
    pub fn scenarios(&self) -> impl Iterator<Item = &ResolvedMarketData> {
        self.scenarios.iter()
    }

    /// Returns the scenario names in scenario order.
    pub fn scenario_names(&self) -> &[String] {
        &self.scenario_names
    }

    /// Returns requirements that could not be resolved, with the reason.
    pub fn unresolved(&self) -> &BTreeMap<MarketDataRequirement, ResolutionError> {
        &self.unresolved
    }

    /// Returns whether every requirement was resolved.
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }
}
