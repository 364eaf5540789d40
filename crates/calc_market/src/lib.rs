//! # calc_market: Market Data Plane for the Calcgrid Calculation Engine
//!
//! Implements the two market-data phases of the engine pipeline:
//!
//! 1. **Requirements** ([`requirements`]): abstract keys describing what a
//!    calculation needs (a discount curve for a currency, a forward curve
//!    for an index, an FX rate, a fixing history, a volatility surface),
//!    collected into deduplicated sets.
//! 2. **Resolution** ([`rules`], [`resolver`]): an ordered rule chain maps
//!    each abstract key to a concrete identifier in the base
//!    [`snapshot::MarketDataSnapshot`] (first matching rule wins), and the
//!    resolver builds one immutable [`resolved::ResolvedMarketData`] view
//!    per scenario from the shared baseline plus scenario perturbations
//!    ([`scenario`]). Perturbations never mutate the baseline.
//!
//! Resolution is deterministic: requirement sets iterate in a stable
//! order, and identical inputs always produce identical bindings.

pub mod requirements;
pub mod resolved;
pub mod resolver;
pub mod rules;
pub mod scenario;
pub mod snapshot;

pub use requirements::{MarketDataId, MarketDataRequirement, MarketDataRequirements};
pub use resolved::{ResolvedMarketData, ScenarioMarketData};
pub use resolver::{build_scenario_market_data, build_scenario_market_data_strict, ResolutionError};
pub use rules::{MarketDataRule, MarketDataRules};
pub use scenario::{Perturbation, ScenarioDefinition};
pub use snapshot::MarketDataSnapshot;
