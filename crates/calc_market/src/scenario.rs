//! Scenario definitions and market data perturbations.
//!
//! A scenario is a named set of perturbations applied to the resolved
//! baseline. Perturbations match concrete snapshot identifiers with the
//! same glob patterns the resolution rules use, and always produce
//! modified copies: the baseline is never mutated.

/// A single market data perturbation.
///
/// # Variants
///
/// - `CurveParallelShift`: absolute shift of all zero rates on matching curves
/// - `FxRateShift`: relative shift of matching FX rates
/// - `VolatilityShift`: absolute shift of matching volatility surfaces
#[derive(Debug, Clone, PartialEq)]
pub enum Perturbation {
    /// Shifts all zero rates of matching curves by an absolute amount.
    CurveParallelShift {
        /// Glob pattern over snapshot curve names (e.g. `"USD-*"`)
        pattern: String,
        /// Absolute rate shift (e.g. `0.0001` for +1bp)
        shift: f64,
    },
    /// Scales matching FX rates by `1 + relative`.
    FxRateShift {
        /// Glob pattern over pair notation (e.g. `"EUR/USD"`)
        pattern: String,
        /// Relative shift (e.g. `0.05` for +5%)
        relative: f64,
    },
    /// Shifts matching volatility surfaces by an absolute amount.
    VolatilityShift {
        /// Glob pattern over snapshot surface names
        pattern: String,
        /// Absolute volatility shift
        shift: f64,
    },
}

impl Perturbation {
    /// Creates a parallel curve shift perturbation.
    pub fn curve_parallel(pattern: impl Into<String>, shift: f64) -> Self {
        Perturbation::CurveParallelShift {
            pattern: pattern.into(),
            shift,
        }
    }

    /// Creates a relative FX rate shift perturbation.
    pub fn fx_relative(pattern: impl Into<String>, relative: f64) -> Self {
        Perturbation::FxRateShift {
            pattern: pattern.into(),
            relative,
        }
    }

    /// Creates an absolute volatility shift perturbation.
    pub fn vol_absolute(pattern: impl Into<String>, shift: f64) -> Self {
        Perturbation::VolatilityShift {
            pattern: pattern.into(),
            shift,
        }
    }
}

/// A named scenario: a set of coordinated perturbations.
///
/// # Examples
///
/// ```
/// use calc_market::scenario::{Perturbation, ScenarioDefinition};
///
/// let scenario = ScenarioDefinition::new("IR +100bp")
///     .with_perturbation(Perturbation::curve_parallel("*", 0.01));
///
/// assert_eq!(scenario.name(), "IR +100bp");
/// assert_eq!(scenario.perturbations().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioDefinition {
    name: String,
    perturbations: Vec<Perturbation>,
}

impl ScenarioDefinition {
    /// Creates a scenario with no perturbations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            perturbations: Vec::new(),
        }
    }

    /// Adds a perturbation, builder style.
    pub fn with_perturbation(mut self, perturbation: Perturbation) -> Self {
        self.perturbations.push(perturbation);
        self
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the perturbations in application order.
    pub fn perturbations(&self) -> &[Perturbation] {
        &self.perturbations
    }
}
