//! Builds scenario market data from requirements, rules and a snapshot.
//!
//! Resolution runs in three steps, all before any pricing:
//!
//! 1. each requirement is offered to the rule chain (first match wins);
//! 2. the bound identifier is looked up in the base snapshot and the
//!    value is inserted into the baseline view under the abstract key;
//! 3. one view per scenario is produced from the baseline by applying
//!    that scenario's perturbations to modified copies.
//!
//! Each requirement is resolved at most once per run; every scenario
//! shares the same bindings.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::requirements::{MarketDataId, MarketDataRequirement, MarketDataRequirements};
use crate::resolved::{ResolvedMarketData, ScenarioMarketData};
use crate::rules::{glob_match, MarketDataRules};
use crate::scenario::{Perturbation, ScenarioDefinition};
use crate::snapshot::MarketDataSnapshot;

/// Market data resolution failures.
///
/// # Variants
///
/// - `NoMatchingRule`: no rule in the chain claims the requirement
/// - `MissingData`: a rule bound an identifier the snapshot does not hold
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// No rule in the chain claims the requirement.
    #[error("no market data rule matches requirement: {requirement}")]
    NoMatchingRule {
        /// Display form of the unmatched requirement
        requirement: String,
    },

    /// A rule bound an identifier that the snapshot does not hold.
    #[error("market data not found in snapshot: {id}")]
    MissingData {
        /// Display form of the missing identifier
        id: String,
    },
}

/// One requirement successfully bound to a concrete identifier.
type Binding = (MarketDataRequirement, MarketDataId);

/// Builds scenario market data, deferring unresolved requirements.
///
/// Requirements with no matching rule or no backing snapshot entry are
/// recorded on the returned [`ScenarioMarketData`]; the engine fails only
/// the cells that depend on them. With an empty `scenarios` slice a
/// single unperturbed "Base" scenario is produced.
pub fn build_scenario_market_data(
    requirements: &MarketDataRequirements,
    rules: &MarketDataRules,
    snapshot: &MarketDataSnapshot,
    scenarios: &[ScenarioDefinition],
) -> ScenarioMarketData {
    let mut base = ResolvedMarketData::new(snapshot.valuation_date());
    let mut bindings: Vec<Binding> = Vec::new();
    let mut unresolved: BTreeMap<MarketDataRequirement, ResolutionError> = BTreeMap::new();

    for requirement in requirements.iter() {
        match rules.resolve(requirement) {
            None => {
                let error = ResolutionError::NoMatchingRule {
                    requirement: requirement.to_string(),
                };
                warn!(%requirement, "no matching market data rule");
                unresolved.insert(requirement.clone(), error);
            }
            Some(id) => match bind(requirement, &id, snapshot, &mut base) {
                Ok(()) => bindings.push((requirement.clone(), id)),
                Err(error) => {
                    warn!(%requirement, %error, "market data missing from snapshot");
                    unresolved.insert(requirement.clone(), error);
                }
            },
        }
    }

    debug!(
        resolved = bindings.len(),
        unresolved = unresolved.len(),
        scenarios = scenarios.len().max(1),
        "market data resolution complete"
    );

    let (names, views) = if scenarios.is_empty() {
        (vec!["Base".to_string()], vec![base])
    } else {
        let names = scenarios.iter().map(|s| s.name().to_string()).collect();
        let views = scenarios
            .iter()
            .map(|definition| perturbed_copy(&base, &bindings, definition))
            .collect();
        (names, views)
    };

    ScenarioMarketData::from_scenarios(names, views, unresolved)
}

/// Builds scenario market data, failing on the first unresolved
/// requirement.
///
/// # Errors
///
/// The first [`ResolutionError`] in stable requirement order.
pub fn build_scenario_market_data_strict(
    requirements: &MarketDataRequirements,
    rules: &MarketDataRules,
    snapshot: &MarketDataSnapshot,
    scenarios: &[ScenarioDefinition],
) -> Result<ScenarioMarketData, ResolutionError> {
    let market = build_scenario_market_data(requirements, rules, snapshot, scenarios);
    if let Some((_, error)) = market.unresolved().iter().next() {
        return Err(error.clone());
    }
    Ok(market)
}

/// Looks up the bound identifier in the snapshot and inserts its value
/// into the baseline under the requirement's abstract key.
fn bind(
    requirement: &MarketDataRequirement,
    id: &MarketDataId,
    snapshot: &MarketDataSnapshot,
    base: &mut ResolvedMarketData,
) -> Result<(), ResolutionError> {
    let missing = || ResolutionError::MissingData { id: id.to_string() };
    match (requirement, id) {
        (MarketDataRequirement::DiscountCurve(currency), MarketDataId::Curve(curve_id)) => {
            let curve = snapshot.curve(curve_id).ok_or_else(missing)?.clone();
            base.insert_discount_curve(*currency, curve);
            Ok(())
        }
        (MarketDataRequirement::ForwardCurve(index), MarketDataId::Curve(curve_id)) => {
            let curve = snapshot.curve(curve_id).ok_or_else(missing)?.clone();
            base.insert_forward_curve(index.clone(), curve);
            Ok(())
        }
        (MarketDataRequirement::FxRate(pair), MarketDataId::FxRate(source_pair)) => {
            let rate = snapshot.fx_rate(source_pair).ok_or_else(missing)?;
            base.insert_fx_rate(*pair, rate);
            Ok(())
        }
        (MarketDataRequirement::IndexFixings(index), MarketDataId::Fixings(source_index)) => {
            let series = snapshot.fixings(source_index).ok_or_else(missing)?.clone();
            base.insert_fixings(index.clone(), series);
            Ok(())
        }
        (MarketDataRequirement::Volatility(requested), MarketDataId::Surface(surface_id)) => {
            let surface = *snapshot.surface(surface_id).ok_or_else(missing)?;
            base.insert_surface(requested.clone(), surface);
            Ok(())
        }
        // Rules only produce identifiers of the matching kind; any other
        // combination indicates a rules bug and binds nothing.
        _ => Err(missing()),
    }
}

/// Produces a perturbed copy of the baseline for one scenario.
///
/// Perturbation patterns match the concrete identifiers the requirements
/// were bound to, so a pattern like `"USD-*"` hits every binding sourced
/// from a snapshot curve whose name starts with `USD-`.
fn perturbed_copy(
    base: &ResolvedMarketData,
    bindings: &[Binding],
    definition: &ScenarioDefinition,
) -> ResolvedMarketData {
    let mut view = base.clone();
    for perturbation in definition.perturbations() {
        for (requirement, id) in bindings {
            apply_to_binding(&mut view, perturbation, requirement, id);
        }
    }
    view
}

fn apply_to_binding(
    view: &mut ResolvedMarketData,
    perturbation: &Perturbation,
    requirement: &MarketDataRequirement,
    id: &MarketDataId,
) {
    match (perturbation, requirement, id) {
        (
            Perturbation::CurveParallelShift { pattern, shift },
            MarketDataRequirement::DiscountCurve(currency),
            MarketDataId::Curve(curve_id),
        ) if glob_match(pattern, curve_id.as_str()) => {
            view.map_discount_curve(*currency, |c| c.parallel_shift(*shift));
        }
        (
            Perturbation::CurveParallelShift { pattern, shift },
            MarketDataRequirement::ForwardCurve(index),
            MarketDataId::Curve(curve_id),
        ) if glob_match(pattern, curve_id.as_str()) => {
            view.map_forward_curve(index, |c| c.parallel_shift(*shift));
        }
        (
            Perturbation::FxRateShift { pattern, relative },
            MarketDataRequirement::FxRate(pair),
            MarketDataId::FxRate(source_pair),
        ) if glob_match(pattern, &source_pair.to_string()) => {
            view.scale_fx_rate(*pair, 1.0 + relative);
        }
        (
            Perturbation::VolatilityShift { pattern, shift },
            MarketDataRequirement::Volatility(requested),
            MarketDataId::Surface(surface_id),
        ) if glob_match(pattern, surface_id.as_str()) => {
            view.shift_surface(requested, *shift);
        }
        _ => {}
    }
}
