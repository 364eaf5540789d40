//! Base market data snapshot keyed by concrete identifiers.

use std::collections::HashMap;

use calc_core::market_data::curves::CurveEnum;
use calc_core::market_data::surfaces::FlatVol;
use calc_core::market_data::FixingSeries;
use calc_core::types::ids::{CurveId, IndexId, SurfaceId};
use calc_core::types::time::Date;
use calc_core::types::CurrencyPair;

/// Unresolved market data for one valuation date, keyed by concrete
/// identifiers.
///
/// This is the form market data arrives in from a provider: named curves,
/// FX rates by pair, fixing series by index and surfaces by name. The
/// resolver binds requirement keys to entries in this snapshot; the
/// snapshot itself is never handed to calculation functions.
///
/// # Examples
///
/// ```
/// use calc_market::snapshot::MarketDataSnapshot;
/// use calc_core::market_data::curves::CurveEnum;
/// use calc_core::types::{CurveId, Date};
///
/// let snapshot = MarketDataSnapshot::new(Date::from_ymd(2026, 1, 15).unwrap())
///     .with_curve(CurveId::new("USD-OIS"), CurveEnum::flat(0.03));
///
/// assert!(snapshot.curve(&CurveId::new("USD-OIS")).is_some());
/// assert!(snapshot.curve(&CurveId::new("EUR-ESTR")).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct MarketDataSnapshot {
    valuation_date: Date,
    curves: HashMap<CurveId, CurveEnum<f64>>,
    fx_rates: HashMap<CurrencyPair, f64>,
    fixings: HashMap<IndexId, FixingSeries>,
    surfaces: HashMap<SurfaceId, FlatVol<f64>>,
}

impl MarketDataSnapshot {
    /// Creates an empty snapshot for the given valuation date.
    pub fn new(valuation_date: Date) -> Self {
        Self {
            valuation_date,
            curves: HashMap::new(),
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

    /// Adds a named curve, builder style.
    pub fn with_curve(mut self, id: CurveId, curve: CurveEnum<f64>) -> Self {
        self.curves.insert(id, curve);
        self
    }

    /// Adds an FX rate for a pair, builder style.
    ///
    /// The rate is quoted as units of quote currency per one unit of base
    /// currency.
    pub fn with_fx_rate(mut self, pair: CurrencyPair, rate: f64) -> Self {
        self.fx_rates.insert(pair, rate);
        self
    }

    /// Adds a fixing series for an index, builder style.
    pub fn with_fixings(mut self, index: IndexId, series: FixingSeries) -> Self {
        self.fixings.insert(index, series);
        self
    }

    /// Adds a volatility surface, builder style.
    pub fn with_surface(mut self, id: SurfaceId, surface: FlatVol<f64>) -> Self {
        self.surfaces.insert(id, surface);
        self
    }

    /// Returns the curve stored under `id`, if any.
    pub fn curve(&self, id: &CurveId) -> Option<&CurveEnum<f64>> {
        self.curves.get(id)
    }

    /// Returns the FX rate stored for `pair`, if any.
    pub fn fx_rate(&self, pair: &CurrencyPair) -> Option<f64> {
        self.fx_rates.get(pair).copied()
    }

    /// Returns the fixing series stored for `index`, if any.
    pub fn fixings(&self, index: &IndexId) -> Option<&FixingSeries> {
        self.fixings.get(index)
    }

    /// Returns the surface stored under `id`, if any.
    pub fn surface(&self, id: &SurfaceId) -> Option<&FlatVol<f64>> {
        self.surfaces.get(id)
    }

    /// Returns the number of stored curves.
    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }
}
