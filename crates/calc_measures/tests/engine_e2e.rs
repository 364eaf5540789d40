//! End-to-end tests: full pipeline from trades and rules to the results
//! grid, against fixed test curves with recorded reference values.

use calc_core::market_data::curves::CurveEnum;
use calc_core::reference::{HolidayCalendar, ReferenceData};
use calc_core::types::ids::{CalendarId, CounterpartyId, CurveId, TradeId};
use calc_core::types::time::{Date, DayCount};
use calc_core::types::{Currency, CurrencyPair};
use calc_engine::{
    collect_requirements, CalculationFailure, CalculationRunner, Column, Measure, RunnerConfig,
};
use calc_market::build_scenario_market_data_strict;
use calc_market::rules::{MarketDataRule, MarketDataRules};
use calc_market::scenario::{Perturbation, ScenarioDefinition};
use calc_market::snapshot::MarketDataSnapshot;
use calc_market::ResolutionError;
use calc_measures::standard_registry;
use calc_trades::products::{Product, TermDeposit};
use calc_trades::{Trade, TradeInfo};

use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn valuation_date() -> Date {
    date(2026, 1, 15)
}

/// Zero curve used by the reference values below: pillars at
/// 0.5/1/2/5 years, rates 2.00/2.50/3.00/3.50%.
fn test_snapshot() -> MarketDataSnapshot {
    MarketDataSnapshot::new(valuation_date()).with_curve(
        CurveId::new("USD-DISC"),
        CurveEnum::zero(vec![0.5, 1.0, 2.0, 5.0], vec![0.02, 0.025, 0.03, 0.035]).unwrap(),
    )
}

fn test_rules() -> MarketDataRules {
    MarketDataRules::new()
        .with_rule(MarketDataRule::discount_curve("USD", CurveId::new("USD-DISC")))
        .with_rule(MarketDataRule::fx_rate("*"))
}

fn test_reference_data() -> ReferenceData {
    ReferenceData::new().with_calendar(CalendarId::new("USNY"), HolidayCalendar::new())
}

fn deposit_trade(id: &str, notional: f64, rate: f64) -> Trade {
    let deposit = TermDeposit::new(
        Currency::USD,
        notional,
        rate,
        date(2026, 1, 15),
        date(2026, 7, 15),
        DayCount::Act360,
        CalendarId::new("USNY"),
    )
    .unwrap();
    Trade::new(
        TradeId::new(id),
        TradeInfo::new(CounterpartyId::new("CP001"), date(2026, 1, 13)),
        Product::TermDeposit(deposit),
    )
}

fn test_trades() -> Vec<Trade> {
    vec![
        deposit_trade("DEP-A", 1_000_000.0, 0.025),
        deposit_trade("DEP-B", 2_000_000.0, 0.030),
    ]
}

fn runner(threads: usize) -> CalculationRunner {
    CalculationRunner::new(standard_registry(), RunnerConfig::new().with_threads(threads))
        .unwrap()
}

// Reference values for the 2x2 grid, derived from the deposit PV
// formula against the curve above: tau = 181/360 (ACT/360), curve time
// 181/365 (ACT/365F), df_end = exp(-0.02 * 181/365).
const PV_A: f64 = 2_576.6103;
const PV_B: f64 = 10_131.3803;
const PAR_RATE: f64 = 0.019824171;
const PV01_A: f64 = -49.7156;
const PV_A_PLUS_100BP: f64 = -2_382.7643;
const TOLERANCE: f64 = 1e-4;

#[test]
fn two_by_two_grid_matches_reference_values() {
    let results = runner(4)
        .calculate(
            &test_trades(),
            &[Column::of(Measure::PresentValue), Column::of(Measure::ParRate)],
            &test_rules(),
            &test_snapshot(),
            &[],
            &test_reference_data(),
        )
        .unwrap();

    assert_eq!(results.row_count(), 2);
    assert_eq!(results.column_count(), 2);

    let amount = |row: usize| {
        results
            .cell(row, 0)
            .unwrap()
            .single_value()
            .unwrap()
            .amount()
            .unwrap()
    };
    assert_eq!(amount(0).currency(), Currency::USD);
    assert!((amount(0).value() - PV_A).abs() < TOLERANCE);
    assert!((amount(1).value() - PV_B).abs() < TOLERANCE);

    let par = |row: usize| {
        results
            .cell(row, 1)
            .unwrap()
            .single_value()
            .unwrap()
            .rate()
            .unwrap()
    };
    // Same curve and dates: both deposits share one par rate
    assert!((par(0) - PAR_RATE).abs() < 1e-9);
    assert!((par(1) - PAR_RATE).abs() < 1e-9);
}

#[test]
fn every_cell_is_populated_exactly_once() {
    let trades = test_trades();
    let columns = vec![
        Column::of(Measure::PresentValue),
        Column::of(Measure::ParRate),
        Column::of(Measure::Pv01),
        Column::of(Measure::BucketedPv01),
        Column::of(Measure::CashFlows),
    ];
    let results = runner(2)
        .calculate(
            &trades,
            &columns,
            &test_rules(),
            &test_snapshot(),
            &[],
            &test_reference_data(),
        )
        .unwrap();

    assert_eq!(results.row_count() * results.column_count(), 10);
    for row in 0..results.row_count() {
        for col in 0..results.column_count() {
            let cell = results.cell(row, col).unwrap();
            assert!(cell.is_success(), "cell ({row}, {col}) failed");
        }
    }
}

#[test]
fn pv01_matches_reference_value() {
    let results = runner(1)
        .calculate(
            &test_trades(),
            &[Column::of(Measure::Pv01)],
            &test_rules(),
            &test_snapshot(),
            &[],
            &test_reference_data(),
        )
        .unwrap();

    let pv01 = results
        .cell(0, 0)
        .unwrap()
        .single_value()
        .unwrap()
        .amount()
        .unwrap()
        .value();
    assert!((pv01 - PV01_A).abs() < TOLERANCE);
}

#[test]
fn scenario_cells_hold_one_result_per_scenario_in_order() {
    let scenarios = vec![
        ScenarioDefinition::new("Base"),
        ScenarioDefinition::new("IR +100bp")
            .with_perturbation(Perturbation::curve_parallel("USD-*", 0.01)),
    ];
    let results = runner(4)
        .calculate(
            &test_trades(),
            &[Column::of(Measure::PresentValue)],
            &test_rules(),
            &test_snapshot(),
            &scenarios,
            &test_reference_data(),
        )
        .unwrap();

    let cell = results.cell(0, 0).unwrap();
    assert_eq!(cell.scenario_count(), 2);

    let value = |i: usize| {
        cell.outcome(i)
            .unwrap()
            .as_ref()
            .unwrap()
            .amount()
            .unwrap()
            .value()
    };
    assert!((value(0) - PV_A).abs() < TOLERANCE);
    assert!((value(1) - PV_A_PLUS_100BP).abs() < TOLERANCE);
}

#[test]
fn unmatched_requirement_fails_with_named_key() {
    let empty_rules = MarketDataRules::new();

    // Strict resolution surfaces the missing key as a run-level error
    let grid = collect_requirements(
        &standard_registry(),
        &test_trades(),
        &[Column::of(Measure::PresentValue)],
    );
    let strict = build_scenario_market_data_strict(
        grid.union(),
        &empty_rules,
        &test_snapshot(),
        &[],
    );
    assert_eq!(
        strict.unwrap_err(),
        ResolutionError::NoMatchingRule {
            requirement: "discount curve USD".to_string()
        }
    );

    // The runner defers to cell-scoped failures naming the same key
    let results = runner(2)
        .calculate(
            &test_trades(),
            &[Column::of(Measure::PresentValue)],
            &empty_rules,
            &test_snapshot(),
            &[],
            &test_reference_data(),
        )
        .unwrap();
    match results.cell(0, 0).unwrap().first_failure() {
        Some(CalculationFailure::MissingMarketData(message)) => {
            assert!(message.contains("discount curve USD"));
        }
        other => panic!("expected MissingMarketData, got {:?}", other),
    }
}

#[test]
fn unsupported_combination_is_isolated_to_its_cell() {
    // Registry knowing only deposit present value
    let mut registry = calc_engine::MeasureRegistry::new();
    registry.register_fn(
        calc_trades::products::ProductType::TermDeposit,
        Measure::PresentValue,
        calc_measures::term_deposit::TermDepositPresentValue,
    );
    let runner = CalculationRunner::new(registry, RunnerConfig::new().with_threads(2)).unwrap();

    let results = runner
        .calculate(
            &test_trades(),
            &[Column::of(Measure::PresentValue), Column::of(Measure::ParRate)],
            &test_rules(),
            &test_snapshot(),
            &[],
            &test_reference_data(),
        )
        .unwrap();

    for row in 0..2 {
        assert!(results.cell(row, 0).unwrap().is_success());
        assert!(matches!(
            results.cell(row, 1).unwrap().first_failure(),
            Some(CalculationFailure::UnsupportedCombination { .. })
        ));
    }
}

#[test]
fn rerunning_identical_inputs_is_deterministic_across_thread_counts() {
    let trades: Vec<Trade> = (0..25)
        .map(|i| deposit_trade(&format!("D{i}"), 1_000_000.0 + 1_000.0 * i as f64, 0.025))
        .collect();
    let columns = vec![
        Column::of(Measure::PresentValue),
        Column::of(Measure::ParRate),
        Column::of(Measure::Pv01),
    ];

    let run = |threads: usize| {
        runner(threads)
            .calculate(
                &trades,
                &columns,
                &test_rules(),
                &test_snapshot(),
                &[],
                &test_reference_data(),
            )
            .unwrap()
    };

    let first = run(1);
    let second = run(8);
    for row in 0..trades.len() {
        for col in 0..columns.len() {
            assert_eq!(first.cell(row, col).unwrap(), second.cell(row, col).unwrap());
        }
    }
}

#[test]
fn reporting_currency_converts_amount_cells() {
    let pair = CurrencyPair::new(Currency::USD, Currency::EUR).unwrap();
    let snapshot = test_snapshot().with_fx_rate(pair, 0.92);
    let results = runner(2)
        .calculate(
            &test_trades(),
            &[Column::of(Measure::PresentValue).with_reporting_currency(Currency::EUR)],
            &test_rules(),
            &snapshot,
            &[],
            &test_reference_data(),
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
    assert!((amount.value() - PV_A * 0.92).abs() < TOLERANCE);
}

#[test]
fn swap_prices_through_the_full_pipeline() {
    use calc_core::market_data::FixingSeries;
    use calc_core::types::ids::IndexId;
    use calc_trades::products::{FixedLeg, FloatingLeg, InterestRateSwap, SwapDirection};
    use calc_trades::schedule::{Frequency, Schedule};

    let start = date(2026, 1, 15);
    let end = date(2031, 1, 15);
    let fixed = FixedLeg::new(
        Schedule::generate(start, end, Frequency::Annual).unwrap(),
        0.03,
        DayCount::Thirty360,
    );
    let floating = FloatingLeg::new(
        Schedule::generate(start, end, Frequency::SemiAnnual).unwrap(),
        IndexId::new("USD-SOFR"),
        DayCount::Act360,
    );
    let swap = InterestRateSwap::new(
        10_000_000.0,
        Currency::USD,
        SwapDirection::PayFixed,
        fixed,
        floating,
        CalendarId::new("USNY"),
    )
    .unwrap();
    let trade = Trade::new(
        TradeId::new("SWP-1"),
        TradeInfo::new(CounterpartyId::new("CP001"), date(2026, 1, 13)),
        Product::Swap(swap),
    );

    let snapshot = test_snapshot()
        .with_curve(CurveId::new("USD-SOFR-FWD"), CurveEnum::flat(0.035))
        .with_fixings(IndexId::new("USD-SOFR"), FixingSeries::new());
    let rules = test_rules()
        .with_rule(MarketDataRule::forward_curve("USD-*", CurveId::new("USD-SOFR-FWD")))
        .with_rule(MarketDataRule::index_fixings("*"));

    let results = runner(2)
        .calculate(
            &[trade],
            &[Column::of(Measure::PresentValue), Column::of(Measure::ParRate)],
            &rules,
            &snapshot,
            &[],
            &test_reference_data(),
        )
        .unwrap();

    // Paying 3% fixed against ~3.5% forwards has positive value
    let pv = results
        .cell(0, 0)
        .unwrap()
        .single_value()
        .unwrap()
        .amount()
        .unwrap()
        .value();
    assert!(pv > 0.0);

    let par = results
        .cell(0, 1)
        .unwrap()
        .single_value()
        .unwrap()
        .rate()
        .unwrap();
    assert!(par > 0.03 && par < 0.045);
}

proptest! {
    // Permuting the trade list permutes the grid rows but never changes
    // the collected requirement set.
    #[test]
    fn requirements_are_permutation_invariant(seed in 0u64..1000) {
        let mut trades: Vec<Trade> = vec![
            deposit_trade("A", 1_000_000.0, 0.02),
            deposit_trade("B", 2_000_000.0, 0.03),
            deposit_trade("C", 3_000_000.0, 0.04),
        ];
        // Cheap deterministic shuffle driven by the seed
        let n = trades.len();
        for i in 0..n {
            let j = ((seed as usize) + i * 7) % n;
            trades.swap(i, j);
        }

        let columns = vec![Column::of(Measure::PresentValue), Column::of(Measure::ParRate)];
        let registry = standard_registry();
        let shuffled = collect_requirements(&registry, &trades, &columns);
        let reference = collect_requirements(&registry, &test_trades(), &columns);
        // Same currencies in play: identical requirement sets
        prop_assert_eq!(shuffled.union(), reference.union());
    }
}
