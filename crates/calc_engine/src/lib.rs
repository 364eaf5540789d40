//! # calc_engine: The Calcgrid Calculation Engine Core
//!
//! Computes requested analytic measures for a collection of trades
//! against one or more market data scenarios, producing a results grid
//! with per-cell success/failure isolation.
//!
//! ## Pipeline
//!
//! A run moves through explicit phases, each stage's output being the
//! next stage's complete input:
//!
//! 1. **Collect** ([`collector`]): for every (trade, column) pair, ask
//!    the registered calculation function what market data it needs;
//!    union the requirement sets.
//! 2. **Resolve** (`calc_market`): map abstract requirements to concrete
//!    snapshot entries via the rule chain and build one immutable market
//!    data view per scenario.
//! 3. **Execute** ([`runner`]): dispatch every cell to its function on a
//!    bounded worker pool; any cell failure is captured as a structured
//!    value, never aborting sibling cells.
//! 4. **Assemble** ([`results`]): the grid preserves input trade and
//!    column order regardless of parallel completion order.
//!
//! ## Dispatch
//!
//! Functions are registered per (product type, measure) pair in the
//! [`registry::MeasureRegistry`]. Lookup is a pure map access with no
//! fallback: an unregistered combination yields an "unsupported
//! combination" failure scoped to its cell.

pub mod collector;
pub mod column;
pub mod error;
pub mod function;
pub mod measure;
pub mod registry;
pub mod results;
pub mod runner;

pub use collector::{collect_requirements, GridRequirements};
pub use column::Column;
pub use error::{CalculationFailure, EngineError};
pub use function::CalculationFunction;
pub use measure::Measure;
pub use registry::MeasureRegistry;
pub use results::{
    CashFlow, CellResult, CellValue, CurrencyAmount, Results, ScenarioArray, SensitivityBucket,
};
pub use runner::{CalculationRunner, RunnerConfig};
