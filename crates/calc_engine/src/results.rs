//! The results grid and cell outcome types.

use std::fmt;

use calc_core::types::ids::TradeId;
use calc_core::types::time::Date;
use calc_core::types::Currency;

use crate::column::Column;
use crate::error::CalculationFailure;

/// A monetary amount in a specific currency.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyAmount {
    currency: Currency,
    value: f64,
}

impl CurrencyAmount {
    /// Creates an amount.
    pub fn new(currency: Currency, value: f64) -> Self {
        Self { currency, value }
    }

    /// Returns the currency.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the numeric value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.*} {}",
            self.currency.decimal_places() as usize,
            self.value,
            self.currency
        )
    }
}

/// A single projected cash flow.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CashFlow {
    payment_date: Date,
    currency: Currency,
    amount: f64,
}

impl CashFlow {
    /// Creates a cash flow.
    pub fn new(payment_date: Date, currency: Currency, amount: f64) -> Self {
        Self {
            payment_date,
            currency,
            amount,
        }
    }

    /// Returns the payment date.
    #[inline]
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// Returns the currency.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the signed amount (positive = receive).
    #[inline]
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

/// One labelled bucket of a bucketed sensitivity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensitivityBucket {
    label: String,
    value: f64,
}

impl SensitivityBucket {
    /// Creates a bucket.
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    /// Returns the bucket label (e.g. a pillar tenor).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the bucket value.
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// A computed cell value.
///
/// # Variants
///
/// - `Amount`: a currency amount (present value, PV01)
/// - `Rate`: a unitless rate (par rate)
/// - `Bucketed`: labelled sensitivity buckets
/// - `CashFlows`: a projected cash flow schedule
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// A monetary amount.
    Amount(CurrencyAmount),
    /// A unitless rate.
    Rate(f64),
    /// Labelled sensitivity buckets.
    Bucketed(Vec<SensitivityBucket>),
    /// A projected cash flow schedule.
    CashFlows(Vec<CashFlow>),
}

impl CellValue {
    /// Returns the amount if this is an amount value.
    pub fn amount(&self) -> Option<CurrencyAmount> {
        match self {
            CellValue::Amount(a) => Some(*a),
            _ => None,
        }
    }

    /// Returns the rate if this is a rate value.
    pub fn rate(&self) -> Option<f64> {
        match self {
            CellValue::Rate(r) => Some(*r),
            _ => None,
        }
    }

    /// Returns the buckets if this is a bucketed value.
    pub fn buckets(&self) -> Option<&[SensitivityBucket]> {
        match self {
            CellValue::Bucketed(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the cash flows if this is a schedule value.
    pub fn cash_flows(&self) -> Option<&[CashFlow]> {
        match self {
            CellValue::CashFlows(c) => Some(c),
            _ => None,
        }
    }
}

/// N per-scenario values wrapped as one unit, in scenario order.
///
/// Single- and multi-scenario runs share this shape; a single-scenario
/// run simply holds one element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioArray<T> {
    values: Vec<T>,
}

impl<T> ScenarioArray<T> {
    /// Wraps per-scenario values.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty; every cell covers at least one
    /// scenario.
    pub fn new(values: Vec<T>) -> Self {
        assert!(!values.is_empty(), "ScenarioArray must not be empty");
        Self { values }
    }

    /// Wraps a single-scenario value.
    pub fn single(value: T) -> Self {
        Self {
            values: vec![value],
        }
    }

    /// Returns the number of scenarios.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for container-API symmetry.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value for scenario `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    /// Iterates values in scenario order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }
}

/// The outcome of one grid cell: per-scenario results in scenario order.
///
/// A whole-cell failure (e.g. an unsupported combination, detected
/// before any scenario runs) is replicated across the scenario slots so
/// every cell always exposes exactly N sub-results.
#[derive(Debug, Clone, PartialEq)]
pub struct CellResult {
    outcomes: ScenarioArray<Result<CellValue, CalculationFailure>>,
}

impl CellResult {
    /// Wraps per-scenario outcomes.
    pub fn from_outcomes(outcomes: Vec<Result<CellValue, CalculationFailure>>) -> Self {
        Self {
            outcomes: ScenarioArray::new(outcomes),
        }
    }

    /// Creates a whole-cell failure replicated over `scenario_count`
    /// slots.
    pub fn failure(failure: CalculationFailure, scenario_count: usize) -> Self {
        let n = scenario_count.max(1);
        Self {
            outcomes: ScenarioArray::new(vec![Err(failure); n]),
        }
    }

    /// Returns the number of per-scenario sub-results.
    pub fn scenario_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns the outcome for scenario `index`, if in range.
    pub fn outcome(&self, index: usize) -> Option<&Result<CellValue, CalculationFailure>> {
        self.outcomes.get(index)
    }

    /// Iterates outcomes in scenario order.
    pub fn outcomes(&self) -> impl Iterator<Item = &Result<CellValue, CalculationFailure>> {
        self.outcomes.iter()
    }

    /// Returns whether every scenario produced a value.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.is_ok())
    }

    /// Returns the first failure in scenario order, if any.
    pub fn first_failure(&self) -> Option<&CalculationFailure> {
        self.outcomes.iter().find_map(|o| o.as_ref().err())
    }

    /// Returns the value of a successful single-scenario cell.
    pub fn single_value(&self) -> Option<&CellValue> {
        if self.outcomes.len() == 1 {
            self.outcomes.get(0).and_then(|o| o.as_ref().ok())
        } else {
            None
        }
    }
}

/// The results grid: one cell per (trade row, column), in input order.
///
/// `cell(i, j)` corresponds to `trades[i]` priced for `columns[j]` for
/// the lifetime of the instance, regardless of the completion order of
/// parallel cell tasks.
#[derive(Debug, Clone)]
pub struct Results {
    trade_ids: Vec<TradeId>,
    columns: Vec<Column>,
    cells: Vec<CellResult>,
}

impl Results {
    /// Assembles a results grid.
    ///
    /// # Panics
    ///
    /// Panics if `cells.len() != trade_ids.len() * columns.len()`; the
    /// runner populates every cell exactly once.
    pub fn new(trade_ids: Vec<TradeId>, columns: Vec<Column>, cells: Vec<CellResult>) -> Self {
        assert_eq!(
            cells.len(),
            trade_ids.len() * columns.len(),
            "results grid must hold exactly rows * columns cells"
        );
        Self {
            trade_ids,
            columns,
            cells,
        }
    }

    /// Returns the number of trade rows.
    pub fn row_count(&self) -> usize {
        self.trade_ids.len()
    }

    /// Returns the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the cell for (`row`, `col`), if in range.
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellResult> {
        if row >= self.row_count() || col >= self.column_count() {
            return None;
        }
        self.cells.get(row * self.column_count() + col)
    }

    /// Returns the cells of one trade row, if in range.
    pub fn row(&self, row: usize) -> Option<&[CellResult]> {
        if row >= self.row_count() {
            return None;
        }
        let start = row * self.column_count();
        Some(&self.cells[start..start + self.column_count()])
    }

    /// Iterates rows in input trade order as (trade id, cells) pairs.
    pub fn rows(&self) -> impl Iterator<Item = (&TradeId, &[CellResult])> {
        self.trade_ids
            .iter()
            .zip(self.cells.chunks(self.columns.len().max(1)))
    }

    /// Returns the trade identifiers in row order.
    pub fn trade_ids(&self) -> &[TradeId] {
        &self.trade_ids
    }

    /// Returns the columns in input order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::Measure;

    fn rate_cell(value: f64) -> CellResult {
        CellResult::from_outcomes(vec![Ok(CellValue::Rate(value))])
    }

    #[test]
    fn test_currency_amount_display() {
        let amount = CurrencyAmount::new(Currency::USD, 1234.5678);
        assert_eq!(amount.to_string(), "1234.57 USD");
        let amount = CurrencyAmount::new(Currency::JPY, 1234.5678);
        assert_eq!(amount.to_string(), "1235 JPY");
    }

    #[test]
    fn test_cell_value_accessors() {
        let amount = CellValue::Amount(CurrencyAmount::new(Currency::USD, 5.0));
        assert!(amount.amount().is_some());
        assert!(amount.rate().is_none());

        let rate = CellValue::Rate(0.05);
        assert_eq!(rate.rate(), Some(0.05));
        assert!(rate.cash_flows().is_none());
    }

    #[test]
    fn test_scenario_array_order() {
        let array = ScenarioArray::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(array.len(), 3);
        assert_eq!(array.get(1), Some(&2.0));
        let collected: Vec<_> = array.iter().copied().collect();
        assert_eq!(collected, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn test_scenario_array_rejects_empty() {
        let _ = ScenarioArray::<f64>::new(vec![]);
    }

    #[test]
    fn test_cell_result_failure_replication() {
        let failure = CalculationFailure::MissingMarketData("x".to_string());
        let cell = CellResult::failure(failure.clone(), 3);
        assert_eq!(cell.scenario_count(), 3);
        assert!(!cell.is_success());
        assert_eq!(cell.first_failure(), Some(&failure));
        for outcome in cell.outcomes() {
            assert_eq!(outcome.as_ref().err(), Some(&failure));
        }
    }

    #[test]
    fn test_cell_result_single_value() {
        let cell = rate_cell(0.02);
        assert!(cell.is_success());
        assert_eq!(cell.single_value(), Some(&CellValue::Rate(0.02)));

        let multi = CellResult::from_outcomes(vec![
            Ok(CellValue::Rate(0.02)),
            Ok(CellValue::Rate(0.03)),
        ]);
        assert_eq!(multi.single_value(), None);
    }

    #[test]
    fn test_mixed_scenario_outcomes() {
        let cell = CellResult::from_outcomes(vec![
            Ok(CellValue::Rate(0.02)),
            Err(CalculationFailure::Calculation("boom".to_string())),
        ]);
        assert!(!cell.is_success());
        assert!(cell.outcome(0).unwrap().is_ok());
        assert!(cell.outcome(1).unwrap().is_err());
    }

    #[test]
    fn test_results_grid_indexing() {
        let trade_ids = vec![TradeId::new("T1"), TradeId::new("T2")];
        let columns = vec![Column::of(Measure::PresentValue), Column::of(Measure::ParRate)];
        let cells = vec![
            rate_cell(11.0),
            rate_cell(12.0),
            rate_cell(21.0),
            rate_cell(22.0),
        ];
        let results = Results::new(trade_ids, columns, cells);

        assert_eq!(results.row_count(), 2);
        assert_eq!(results.column_count(), 2);
        assert_eq!(
            results.cell(0, 1).unwrap().single_value(),
            Some(&CellValue::Rate(12.0))
        );
        assert_eq!(
            results.cell(1, 0).unwrap().single_value(),
            Some(&CellValue::Rate(21.0))
        );
        assert!(results.cell(2, 0).is_none());
        assert!(results.cell(0, 2).is_none());
    }

    #[test]
    fn test_results_rows_iteration() {
        let trade_ids = vec![TradeId::new("T1"), TradeId::new("T2")];
        let columns = vec![Column::of(Measure::PresentValue)];
        let cells = vec![rate_cell(1.0), rate_cell(2.0)];
        let results = Results::new(trade_ids, columns, cells);

        let rows: Vec<_> = results.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0.as_str(), "T1");
        assert_eq!(rows[1].1.len(), 1);
    }

    #[test]
    #[should_panic(expected = "rows * columns")]
    fn test_results_shape_mismatch_panics() {
        let _ = Results::new(
            vec![TradeId::new("T1")],
            vec![Column::of(Measure::PresentValue)],
            vec![],
        );
    }
}
