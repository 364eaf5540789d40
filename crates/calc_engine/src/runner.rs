//! The calculation runner: orchestrates collect, resolve, execute and
//! assemble.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use calc_core::reference::ReferenceData;
use calc_core::types::CurrencyPair;
use calc_market::build_scenario_market_data;
use calc_market::resolved::{ResolvedMarketData, ScenarioMarketData};
use calc_market::rules::MarketDataRules;
use calc_market::scenario::ScenarioDefinition;
use calc_market::snapshot::MarketDataSnapshot;
use calc_trades::Trade;

use crate::collector::{collect_requirements, GridRequirements};
use crate::column::Column;
use crate::error::{CalculationFailure, EngineError};
use crate::registry::MeasureRegistry;
use crate::results::{CellResult, CellValue, CurrencyAmount, Results};

/// Worker pool configuration for a runner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Number of worker threads in the runner's dedicated pool
    pub threads: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
        }
    }
}

impl RunnerConfig {
    /// Creates a configuration with the default thread count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the worker thread count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }
}

/// Orchestrates the full calculation pipeline over a dedicated bounded
/// worker pool.
///
/// The pool is acquired at construction and its lifetime is scoped to
/// the runner: dropping the runner releases the pool, including on
/// error paths where resolution fails before execution begins. Cells
/// are embarrassingly parallel; the only ordering guarantee is the
/// final grid layout, which mirrors input order deterministically
/// regardless of completion order.
///
/// `calculate` blocks the calling thread until every cell has resolved
/// to a value or a structured failure. There is no retry loop: failures
/// are terminal per cell and the caller decides whether to re-run.
pub struct CalculationRunner {
    registry: MeasureRegistry,
    pool: ThreadPool,
}

impl CalculationRunner {
    /// Creates a runner owning a dedicated worker pool.
    ///
    /// # Errors
    ///
    /// - `EngineError::ZeroThreads` if the configured thread count is 0
    /// - `EngineError::PoolBuild` if the pool cannot be constructed
    pub fn new(registry: MeasureRegistry, config: RunnerConfig) -> Result<Self, EngineError> {
        if config.threads == 0 {
            return Err(EngineError::ZeroThreads);
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
            .map_err(|e| EngineError::PoolBuild(e.to_string()))?;
        Ok(Self { registry, pool })
    }

    /// Creates a runner with one worker per available CPU core.
    pub fn with_defaults(registry: MeasureRegistry) -> Result<Self, EngineError> {
        Self::new(registry, RunnerConfig::default())
    }

    /// Returns the measure registry.
    pub fn registry(&self) -> &MeasureRegistry {
        &self.registry
    }

    /// Runs the full pipeline: collect requirements, resolve market
    /// data, execute the grid, assemble results.
    ///
    /// With an empty `scenarios` slice the run prices a single
    /// unperturbed scenario.
    ///
    /// # Errors
    ///
    /// Setup errors only ([`EngineError`]); every downstream failure is
    /// captured cell-locally in the returned [`Results`].
    pub fn calculate(
        &self,
        trades: &[Trade],
        columns: &[Column],
        rules: &MarketDataRules,
        snapshot: &MarketDataSnapshot,
        scenarios: &[ScenarioDefinition],
        reference_data: &ReferenceData,
    ) -> Result<Results, EngineError> {
        validate_inputs(trades, columns)?;
        debug!(trades = trades.len(), columns = columns.len(), "run created");

        let grid = collect_requirements(&self.registry, trades, columns);
        debug!(requirements = grid.union().len(), "requirements collected");

        let market = build_scenario_market_data(grid.union(), rules, snapshot, scenarios);
        debug!(
            scenarios = market.scenario_count(),
            unresolved = market.unresolved().len(),
            "market data resolved"
        );

        self.execute(trades, columns, &grid, &market, reference_data)
    }

    /// Runs against pre-built scenario market data, skipping the
    /// resolution phase.
    ///
    /// # Errors
    ///
    /// Setup errors only ([`EngineError`]).
    pub fn calculate_with_market_data(
        &self,
        trades: &[Trade],
        columns: &[Column],
        market: &ScenarioMarketData,
        reference_data: &ReferenceData,
    ) -> Result<Results, EngineError> {
        validate_inputs(trades, columns)?;
        let grid = collect_requirements(&self.registry, trades, columns);
        self.execute(trades, columns, &grid, market, reference_data)
    }

    /// Executes the trade x column grid on the owned pool and assembles
    /// the results matrix in input order.
    fn execute(
        &self,
        trades: &[Trade],
        columns: &[Column],
        grid: &GridRequirements,
        market: &ScenarioMarketData,
        reference_data: &ReferenceData,
    ) -> Result<Results, EngineError> {
        let n_cols = columns.len();
        let n_cells = trades.len() * n_cols;
        debug!(cells = n_cells, "executing");

        let registry = &self.registry;
        let cells: Vec<CellResult> = self.pool.install(|| {
            (0..n_cells)
                .into_par_iter()
                .map(|index| {
                    let row = index / n_cols;
                    let col = index % n_cols;
                    compute_cell(
                        registry,
                        &trades[row],
                        &columns[col],
                        grid.cell(row, col),
                        market,
                        reference_data,
                    )
                })
                .collect()
        });

        debug!(cells = cells.len(), "completed");
        let trade_ids = trades.iter().map(|t| t.id().clone()).collect();
        Ok(Results::new(trade_ids, columns.to_vec(), cells))
    }
}

fn validate_inputs(trades: &[Trade], columns: &[Column]) -> Result<(), EngineError> {
    if trades.is_empty() {
        return Err(EngineError::EmptyTrades);
    }
    if columns.is_empty() {
        return Err(EngineError::EmptyColumns);
    }
    Ok(())
}

/// Computes one cell. Every failure path is captured into the cell; the
/// function never panics on bad inputs and never aborts sibling cells.
fn compute_cell(
    registry: &MeasureRegistry,
    trade: &Trade,
    column: &Column,
    requirements: Option<&Result<calc_market::requirements::MarketDataRequirements, CalculationFailure>>,
    market: &ScenarioMarketData,
    reference_data: &ReferenceData,
) -> CellResult {
    let n = market.scenario_count();

    let function = match registry.lookup_or_err(trade.product_type(), column.measure()) {
        Ok(function) => function,
        Err(failure) => return CellResult::failure(failure, n),
    };

    // Requirements collected during the planning pass; a collection
    // failure (unsupported combination, bad trade data) fails the cell.
    let cell_requirements = match requirements {
        Some(Ok(requirements)) => requirements,
        Some(Err(failure)) => return CellResult::failure(failure.clone(), n),
        None => return CellResult::failure(
            CalculationFailure::Calculation("cell missing from requirements grid".to_string()),
            n,
        ),
    };

    // Scope partial resolution failures to the cells that need the key.
    if let Some((_, error)) = market
        .unresolved()
        .iter()
        .find(|(requirement, _)| cell_requirements.contains(requirement))
    {
        return CellResult::failure(CalculationFailure::MissingMarketData(error.to_string()), n);
    }

    let outcomes = market
        .scenarios()
        .map(|data| {
            function
                .calculate(trade, data, reference_data)
                .and_then(|value| convert_reporting(value, column, data))
        })
        .collect();
    CellResult::from_outcomes(outcomes)
}

/// Converts amount cells into the column's reporting currency, if one is
/// set and differs from the amount's currency.
fn convert_reporting(
    value: CellValue,
    column: &Column,
    data: &ResolvedMarketData,
) -> Result<CellValue, CalculationFailure> {
    let Some(reporting) = column.reporting_currency() else {
        return Ok(value);
    };
    let CellValue::Amount(amount) = value else {
        return Ok(value);
    };
    if amount.currency() == reporting {
        return Ok(CellValue::Amount(amount));
    }
    let pair = CurrencyPair::new(amount.currency(), reporting)
        .map_err(|e| CalculationFailure::Calculation(e.to_string()))?;
    let rate = data.fx_rate(pair)?;
    Ok(CellValue::Amount(CurrencyAmount::new(
        reporting,
        amount.value() * rate,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::market_data::curves::CurveEnum;
    use calc_core::types::ids::{CalendarId, CounterpartyId, CurveId, TradeId};
    use calc_core::types::time::{Date, DayCount};
    use calc_core::types::Currency;
    use calc_market::requirements::{MarketDataRequirement, MarketDataRequirements};
    use calc_market::rules::MarketDataRule;
    use calc_trades::products::{Product, ProductType, TermDeposit};
    use calc_trades::TradeInfo;

    use crate::function::CalculationFunction;
    use crate::measure::Measure;

    /// Returns the deposit rate as a Rate cell; fails for rates above a
    /// threshold so failure isolation can be exercised.
    struct RateEcho;

    impl CalculationFunction for RateEcho {
        fn requirements(
            &self,
            trade: &Trade,
        ) -> Result<MarketDataRequirements, CalculationFailure> {
            Ok(MarketDataRequirements::new()
                .with(MarketDataRequirement::DiscountCurve(trade.currency())))
        }

        fn calculate(
            &self,
            trade: &Trade,
            _market_data: &ResolvedMarketData,
            _reference_data: &ReferenceData,
        ) -> Result<CellValue, CalculationFailure> {
            let deposit = trade
                .product()
                .as_term_deposit()
                .ok_or_else(|| CalculationFailure::InvalidTrade("not a deposit".to_string()))?;
            if deposit.rate() > 0.5 {
                return Err(CalculationFailure::Calculation(
                    "rate out of range".to_string(),
                ));
            }
            Ok(CellValue::Rate(deposit.rate()))
        }
    }

    /// Reports the discount factor at one year as an Amount cell.
    struct DfAmount;

    impl CalculationFunction for DfAmount {
        fn requirements(
            &self,
            trade: &Trade,
        ) -> Result<MarketDataRequirements, CalculationFailure> {
            Ok(MarketDataRequirements::new()
                .with(MarketDataRequirement::DiscountCurve(trade.currency())))
        }

        fn calculate(
            &self,
            trade: &Trade,
            market_data: &ResolvedMarketData,
            _reference_data: &ReferenceData,
        ) -> Result<CellValue, CalculationFailure> {
            use calc_core::market_data::curves::YieldCurve;
            let curve = market_data.discount_curve(trade.currency())?;
            let df = curve.discount_factor(1.0)?;
            Ok(CellValue::Amount(CurrencyAmount::new(trade.currency(), df)))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn deposit_trade(id: &str, currency: Currency, rate: f64) -> Trade {
        let deposit = TermDeposit::new(
            currency,
            1_000_000.0,
            rate,
            date(2026, 1, 15),
            date(2026, 7, 15),
            DayCount::Act360,
            CalendarId::new("USNY"),
        )
        .unwrap();
        Trade::new(
            TradeId::new(id),
            TradeInfo::new(CounterpartyId::new("CP"), date(2026, 1, 13)),
            Product::TermDeposit(deposit),
        )
    }

    fn registry() -> MeasureRegistry {
        let mut registry = MeasureRegistry::new();
        registry.register_fn(ProductType::TermDeposit, Measure::ParRate, RateEcho);
        registry.register_fn(ProductType::TermDeposit, Measure::PresentValue, DfAmount);
        registry
    }

    fn snapshot() -> MarketDataSnapshot {
        MarketDataSnapshot::new(date(2026, 1, 15))
            .with_curve(CurveId::new("USD-OIS"), CurveEnum::flat(0.03))
    }

    fn rules() -> MarketDataRules {
        MarketDataRules::new()
            .with_rule(MarketDataRule::discount_curve("USD", CurveId::new("USD-OIS")))
            .with_rule(MarketDataRule::fx_rate("*"))
    }

    fn runner_with_threads(threads: usize) -> CalculationRunner {
        CalculationRunner::new(registry(), RunnerConfig::new().with_threads(threads)).unwrap()
    }

    #[test]
    fn test_grid_shape_and_order() {
        let runner = runner_with_threads(2);
        let trades = vec![
            deposit_trade("T1", Currency::USD, 0.01),
            deposit_trade("T2", Currency::USD, 0.02),
            deposit_trade("T3", Currency::USD, 0.03),
        ];
        let columns = vec![Column::of(Measure::ParRate)];
        let results = runner
            .calculate(
                &trades,
                &columns,
                &rules(),
                &snapshot(),
                &[],
                &ReferenceData::new(),
            )
            .unwrap();

        assert_eq!(results.row_count(), 3);
        assert_eq!(results.column_count(), 1);
        // Grid order mirrors input order, not completion order
        for (i, expected) in [0.01, 0.02, 0.03].iter().enumerate() {
            let value = results.cell(i, 0).unwrap().single_value().unwrap();
            assert_eq!(value.rate(), Some(*expected));
        }
    }

    #[test]
    fn test_empty_inputs_are_setup_errors() {
        let runner = runner_with_threads(1);
        let trades = vec![deposit_trade("T1", Currency::USD, 0.01)];
        let columns = vec![Column::of(Measure::ParRate)];

        let result = runner.calculate(
            &[],
            &columns,
            &rules(),
            &snapshot(),
            &[],
            &ReferenceData::new(),
        );
        assert_eq!(result.unwrap_err(), EngineError::EmptyTrades);

        let result = runner.calculate(
            &trades,
            &[],
            &rules(),
            &snapshot(),
            &[],
            &ReferenceData::new(),
        );
        assert_eq!(result.unwrap_err(), EngineError::EmptyColumns);
    }

    #[test]
    fn test_zero_threads_rejected() {
        let result = CalculationRunner::new(registry(), RunnerConfig::new().with_threads(0));
        assert!(matches!(result, Err(EngineError::ZeroThreads)));
    }

    #[test]
    fn test_cell_failure_does_not_abort_siblings() {
        let runner = runner_with_threads(4);
        let trades = vec![
            deposit_trade("OK", Currency::USD, 0.02),
            deposit_trade("BAD", Currency::USD, 0.9), // triggers a calculation error
            deposit_trade("ALSO-OK", Currency::USD, 0.03),
        ];
        let columns = vec![Column::of(Measure::ParRate)];
        let results = runner
            .calculate(
                &trades,
                &columns,
                &rules(),
                &snapshot(),
                &[],
                &ReferenceData::new(),
            )
            .unwrap();

        assert!(results.cell(0, 0).unwrap().is_success());
        assert!(matches!(
            results.cell(1, 0).unwrap().first_failure(),
            Some(CalculationFailure::Calculation(_))
        ));
        assert!(results.cell(2, 0).unwrap().is_success());
    }

    #[test]
    fn test_unsupported_combination_is_cell_scoped() {
        let runner = runner_with_threads(2);
        let trades = vec![deposit_trade("T1", Currency::USD, 0.02)];
        let columns = vec![
            Column::of(Measure::ParRate),
            Column::of(Measure::CashFlows), // not registered
        ];
        let results = runner
            .calculate(
                &trades,
                &columns,
                &rules(),
                &snapshot(),
                &[],
                &ReferenceData::new(),
            )
            .unwrap();

        assert!(results.cell(0, 0).unwrap().is_success());
        assert!(matches!(
            results.cell(0, 1).unwrap().first_failure(),
            Some(CalculationFailure::UnsupportedCombination { .. })
        ));
    }

    #[test]
    fn test_unresolved_requirement_scopes_to_dependent_cells() {
        let runner = runner_with_threads(2);
        // EUR has no discount rule: the EUR trade's cell fails, USD's works
        let trades = vec![
            deposit_trade("USD", Currency::USD, 0.02),
            deposit_trade("EUR", Currency::EUR, 0.02),
        ];
        let columns = vec![Column::of(Measure::ParRate)];
        let results = runner
            .calculate(
                &trades,
                &columns,
                &rules(),
                &snapshot(),
                &[],
                &ReferenceData::new(),
            )
            .unwrap();

        assert!(results.cell(0, 0).unwrap().is_success());
        match results.cell(1, 0).unwrap().first_failure() {
            Some(CalculationFailure::MissingMarketData(message)) => {
                assert!(message.contains("discount curve EUR"));
            }
            other => panic!("expected MissingMarketData, got {:?}", other),
        }
    }

    #[test]
    fn test_scenario_array_shape() {
        use calc_market::scenario::{Perturbation, ScenarioDefinition};

        let runner = runner_with_threads(2);
        let trades = vec![deposit_trade("T1", Currency::USD, 0.02)];
        let columns = vec![Column::of(Measure::PresentValue)];
        let scenarios = vec![
            ScenarioDefinition::new("Base"),
            ScenarioDefinition::new("IR +100bp")
                .with_perturbation(Perturbation::curve_parallel("*", 0.01)),
            ScenarioDefinition::new("IR -100bp")
                .with_perturbation(Perturbation::curve_parallel("*", -0.01)),
        ];
        let results = runner
            .calculate(
                &trades,
                &columns,
                &rules(),
                &snapshot(),
                &scenarios,
                &ReferenceData::new(),
            )
            .unwrap();

        let cell = results.cell(0, 0).unwrap();
        assert_eq!(cell.scenario_count(), 3);

        // Scenario order preserved: base, up, down discount factors differ
        let df = |i: usize| {
            cell.outcome(i)
                .unwrap()
                .as_ref()
                .unwrap()
                .amount()
                .unwrap()
                .value()
        };
        assert!((df(0) - (-0.03_f64).exp()).abs() < 1e-12);
        assert!((df(1) - (-0.04_f64).exp()).abs() < 1e-12);
        assert!((df(2) - (-0.02_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_determinism_across_thread_counts() {
        let trades: Vec<Trade> = (0..40)
            .map(|i| deposit_trade(&format!("T{}", i), Currency::USD, 0.01 + 0.001 * i as f64))
            .collect();
        let columns = vec![Column::of(Measure::ParRate), Column::of(Measure::PresentValue)];

        let run = |threads: usize| {
            runner_with_threads(threads)
                .calculate(
                    &trades,
                    &columns,
                    &rules(),
                    &snapshot(),
                    &[],
                    &ReferenceData::new(),
                )
                .unwrap()
        };

        let single = run(1);
        let parallel = run(8);
        for row in 0..trades.len() {
            for col in 0..columns.len() {
                assert_eq!(
                    single.cell(row, col).unwrap(),
                    parallel.cell(row, col).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_reporting_currency_conversion() {
        let runner = runner_with_threads(2);
        let trades = vec![deposit_trade("T1", Currency::USD, 0.02)];
        let columns = vec![
            Column::of(Measure::PresentValue).with_reporting_currency(Currency::EUR)
        ];
        let pair = CurrencyPair::new(Currency::USD, Currency::EUR).unwrap();
        let snapshot = snapshot().with_fx_rate(pair, 0.92);

        let results = runner
            .calculate(
                &trades,
                &columns,
                &rules(),
                &snapshot,
                &[],
                &ReferenceData::new(),
            )
            .unwrap();

        let amount = results
            .cell(0, 0)
            .unwrap()
            .single_value()
            .unwrap()
            .amount()
            .unwrap();
        assert_eq!(amount.currency(), Currency::EUR);
        assert!((amount.value() - (-0.03_f64).exp() * 0.92).abs() < 1e-12);
    }

    #[test]
    fn test_prebuilt_market_data_path() {
        let runner = runner_with_threads(2);
        let trades = vec![deposit_trade("T1", Currency::USD, 0.02)];
        let columns = vec![Column::of(Measure::PresentValue)];

        let data = ResolvedMarketData::new(date(2026, 1, 15))
            .with_discount_curve(Currency::USD, CurveEnum::flat(0.05));
        let market = ScenarioMarketData::single(data);

        let results = runner
            .calculate_with_market_data(&trades, &columns, &market, &ReferenceData::new())
            .unwrap();
        let value = results.cell(0, 0).unwrap().single_value().unwrap();
        assert!((value.amount().unwrap().value() - (-0.05_f64).exp()).abs() < 1e-12);
    }
}
