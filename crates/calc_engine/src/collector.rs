//! The market data requirements collection pass.
//!
//! A pure, side-effect-free discovery phase: no market data I/O and no
//! pricing happens here. Requirements must be known before market data
//! is built so exactly the needed data is resolved once, avoiding both
//! under-fetching (mid-calculation failures) and over-fetching (wasted
//! I/O). The pass is idempotent and order-independent: permuting trades
//! or columns changes nothing about the resulting union set.

use calc_core::types::CurrencyPair;
use calc_market::requirements::{MarketDataRequirement, MarketDataRequirements};
use calc_trades::Trade;

use crate::column::Column;
use crate::error::CalculationFailure;
use crate::registry::MeasureRegistry;

/// Requirements collected for a grid: the union set plus the per-cell
/// sets used to scope partial resolution failures to exactly the cells
/// they block.
#[derive(Debug, Clone)]
pub struct GridRequirements {
    union: MarketDataRequirements,
    per_cell: Vec<Result<MarketDataRequirements, CalculationFailure>>,
    column_count: usize,
}

impl GridRequirements {
    /// Returns the union of all cell requirement sets.
    pub fn union(&self) -> &MarketDataRequirements {
        &self.union
    }

    /// Returns the requirements of one cell, or the failure that will be
    /// reported for it (e.g. an unsupported combination).
    pub fn cell(
        &self,
        row: usize,
        col: usize,
    ) -> Option<&Result<MarketDataRequirements, CalculationFailure>> {
        if col >= self.column_count {
            return None;
        }
        self.per_cell.get(row * self.column_count + col)
    }

    /// Returns the number of cells covered.
    pub fn cell_count(&self) -> usize {
        self.per_cell.len()
    }
}

/// Collects market data requirements for every (trade, column) pair.
///
/// For each pair the calculation function is resolved via the registry
/// and its `requirements` capability is invoked; the returned sets are
/// unioned and deduplicated. Pairs with no registered function
/// contribute nothing to the union and carry their failure for later
/// cell-scoped reporting.
///
/// A column with a reporting currency differing from the trade currency
/// additionally requires the FX rate for the conversion pair.
pub fn collect_requirements(
    registry: &MeasureRegistry,
    trades: &[Trade],
    columns: &[Column],
) -> GridRequirements {
    let mut union = MarketDataRequirements::new();
    let mut per_cell = Vec::with_capacity(trades.len() * columns.len());

    for trade in trades {
        for column in columns {
            let entry = cell_requirements(registry, trade, column);
            if let Ok(requirements) = &entry {
                union.union(requirements.clone());
            }
            per_cell.push(entry);
        }
    }

    GridRequirements {
        union,
        per_cell,
        column_count: columns.len(),
    }
}

fn cell_requirements(
    registry: &MeasureRegistry,
    trade: &Trade,
    column: &Column,
) -> Result<MarketDataRequirements, CalculationFailure> {
    let function = registry.lookup_or_err(trade.product_type(), column.measure())?;
    let mut requirements = function.requirements(trade)?;
    if let Some(reporting) = column.reporting_currency() {
        if reporting != trade.currency() {
            // Conversion pair is trade currency into reporting currency;
            // new() cannot fail because the currencies differ.
            if let Ok(pair) = CurrencyPair::new(trade.currency(), reporting) {
                requirements.add(MarketDataRequirement::FxRate(pair));
            }
        }
    }
    Ok(requirements)
}
