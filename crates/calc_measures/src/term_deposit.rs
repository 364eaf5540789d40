//! Measure functions for fixed-rate term deposits.
//!
//! A deposit places the notional at start and receives
//! `notional * (1 + r * tau)` at maturity, so its present value against
//! the currency discount curve is
//!
//! ```text
//! pv = maturity_amount * df(pay_end) - notional * df(pay_start)
//! ```
//!
//! with flows paying before the valuation date excluded.

use calc_core::market_data::curves::{CurveEnum, YieldCurve};
use calc_core::reference::{HolidayCalendar, ReferenceData};
use calc_market::requirements::{MarketDataRequirement, MarketDataRequirements};
use calc_market::resolved::ResolvedMarketData;
use calc_trades::products::TermDeposit;
use calc_trades::Trade;

use calc_engine::{
    CalculationFailure, CalculationFunction, CashFlow, CellValue, CurrencyAmount,
    SensitivityBucket,
};

/// Bump size for PV01-style measures: one basis point.
pub(crate) const BUMP: f64 = 1e-4;

fn deposit_of(trade: &Trade) -> Result<&TermDeposit, CalculationFailure> {
    trade
        .product()
        .as_term_deposit()
        .ok_or_else(|| CalculationFailure::InvalidTrade("product is not a term deposit".to_string()))
}

fn calendar_of<'a>(
    deposit: &TermDeposit,
    reference_data: &'a ReferenceData,
) -> Result<&'a HolidayCalendar, CalculationFailure> {
    reference_data
        .calendar_or_err(deposit.calendar())
        .map_err(|e| CalculationFailure::InvalidTrade(e.to_string()))
}

fn deposit_requirements(trade: &Trade) -> Result<MarketDataRequirements, CalculationFailure> {
    let deposit = deposit_of(trade)?;
    Ok(MarketDataRequirements::new()
        .with(MarketDataRequirement::DiscountCurve(deposit.currency())))
}

/// Present value of the deposit against an explicit discount curve.
///
/// Shared by the base PV measure and the bump-and-revalue sensitivities.
fn present_value_with_curve(
    deposit: &TermDeposit,
    data: &ResolvedMarketData,
    calendar: &HolidayCalendar,
    curve: &CurveEnum<f64>,
) -> Result<f64, CalculationFailure> {
    let valuation = data.valuation_date();
    let pay_start = calendar.adjust_following(deposit.start_date());
    let pay_end = calendar.adjust_following(deposit.end_date());
    if pay_end < valuation {
        return Err(CalculationFailure::InvalidTrade(format!(
            "deposit matured on {}",
            pay_end
        )));
    }

    let mut pv = deposit.maturity_amount() * curve.discount_factor(data.time_from_valuation(pay_end))?;
    if pay_start >= valuation {
        pv -= deposit.notional() * curve.discount_factor(data.time_from_valuation(pay_start))?;
    }
    Ok(pv)
}

/// PresentValue measure for term deposits.
pub struct TermDepositPresentValue;

impl CalculationFunction for TermDepositPresentValue {
    fn requirements(&self, trade: &Trade) -> Result<MarketDataRequirements, CalculationFailure> {
        deposit_requirements(trade)
    }

    fn calculate(
        &self,
        trade: &Trade,
        market_data: &ResolvedMarketData,
        reference_data: &ReferenceData,
    ) -> Result<CellValue, CalculationFailure> {
        let deposit = deposit_of(trade)?;
        let calendar = calendar_of(deposit, reference_data)?;
        let curve = market_data.discount_curve(deposit.currency())?;
        let pv = present_value_with_curve(deposit, market_data, calendar, curve)?;
        Ok(CellValue::Amount(CurrencyAmount::new(deposit.currency(), pv)))
    }
}

/// ParRate measure for term deposits: the deposit rate that prices the
/// trade to zero, `(df_start / df_end - 1) / tau`.
pub struct TermDepositParRate;

impl CalculationFunction for TermDepositParRate {
    fn requirements(&self, trade: &Trade) -> Result<MarketDataRequirements, CalculationFailure> {
        deposit_requirements(trade)
    }

    fn calculate(
        &self,
        trade: &Trade,
        market_data: &ResolvedMarketData,
        reference_data: &ReferenceData,
    ) -> Result<CellValue, CalculationFailure> {
        let deposit = deposit_of(trade)?;
        let calendar = calendar_of(deposit, reference_data)?;
        let curve = market_data.discount_curve(deposit.currency())?;

        let valuation = market_data.valuation_date();
        let pay_start = calendar.adjust_following(deposit.start_date());
        let pay_end = calendar.adjust_following(deposit.end_date());
        if pay_end <= valuation {
            return Err(CalculationFailure::InvalidTrade(format!(
                "deposit matured on {}",
                pay_end
            )));
        }

        let t_start = market_data.time_from_valuation(pay_start).max(0.0);
        let df_start = curve.discount_factor(t_start)?;
        let df_end = curve.discount_factor(market_data.time_from_valuation(pay_end))?;
        let tau = deposit.accrual_fraction();
        Ok(CellValue::Rate((df_start / df_end - 1.0) / tau))
    }
}

/// PV01 measure for term deposits: +1bp parallel bump-and-revalue of
/// the discount curve.
pub struct TermDepositPv01;

impl CalculationFunction for TermDepositPv01 {
    fn requirements(&self, trade: &Trade) -> Result<MarketDataRequirements, CalculationFailure> {
        deposit_requirements(trade)
    }

    fn calculate(
        &self,
        trade: &Trade,
        market_data: &ResolvedMarketData,
        reference_data: &ReferenceData,
    ) -> Result<CellValue, CalculationFailure> {
        let deposit = deposit_of(trade)?;
        let calendar = calendar_of(deposit, reference_data)?;
        let curve = market_data.discount_curve(deposit.currency())?;

        let base = present_value_with_curve(deposit, market_data, calendar, curve)?;
        let bumped =
            present_value_with_curve(deposit, market_data, calendar, &curve.parallel_shift(BUMP))?;
        Ok(CellValue::Amount(CurrencyAmount::new(
            deposit.currency(),
            bumped - base,
        )))
    }
}

/// BucketedPV01 measure for term deposits: +1bp per-pillar bumps of the
/// discount curve. A flat (pillarless) curve collapses to one parallel
/// bucket.
pub struct TermDepositBucketedPv01;

impl CalculationFunction for TermDepositBucketedPv01 {
    fn requirements(&self, trade: &Trade) -> Result<MarketDataRequirements, CalculationFailure> {
        deposit_requirements(trade)
    }

    fn calculate(
        &self,
        trade: &Trade,
        market_data: &ResolvedMarketData,
        reference_data: &ReferenceData,
    ) -> Result<CellValue, CalculationFailure> {
        let deposit = deposit_of(trade)?;
        let calendar = calendar_of(deposit, reference_data)?;
        let curve = market_data.discount_curve(deposit.currency())?;
        let base = present_value_with_curve(deposit, market_data, calendar, curve)?;

        let buckets = bucketed_pv01(curve, base, |bumped| {
            present_value_with_curve(deposit, market_data, calendar, bumped)
        })?;
        Ok(CellValue::Bucketed(buckets))
    }
}

/// Per-pillar bump-and-revalue shared by deposit and swap bucketed
/// sensitivities.
pub(crate) fn bucketed_pv01(
    curve: &CurveEnum<f64>,
    base_pv: f64,
    mut revalue: impl FnMut(&CurveEnum<f64>) -> Result<f64, CalculationFailure>,
) -> Result<Vec<SensitivityBucket>, CalculationFailure> {
    if curve.pillar_count() == 0 {
        let bumped = revalue(&curve.parallel_shift(BUMP))?;
        return Ok(vec![SensitivityBucket::new("PAR", bumped - base_pv)]);
    }

    let times = curve.pillar_times();
    let mut buckets = Vec::with_capacity(times.len());
    for (i, time) in times.iter().enumerate() {
        // bumped_pillar is Some for every index below pillar_count
        let bumped_curve = curve
            .bumped_pillar(i, BUMP)
            .ok_or_else(|| CalculationFailure::Calculation("pillar index out of range".to_string()))?;
        let bumped = revalue(&bumped_curve)?;
        buckets.push(SensitivityBucket::new(
            format!("{}Y", time),
            bumped - base_pv,
        ));
    }
    Ok(buckets)
}

/// CashFlows measure for term deposits: the start outflow and maturity
/// inflow, on adjusted payment dates, future flows only.
pub struct TermDepositCashFlows;

impl CalculationFunction for TermDepositCashFlows {
    fn requirements(&self, trade: &Trade) -> Result<MarketDataRequirements, CalculationFailure> {
        deposit_requirements(trade)
    }

    fn calculate(
        &self,
        trade: &Trade,
        market_data: &ResolvedMarketData,
        reference_data: &ReferenceData,
    ) -> Result<CellValue, CalculationFailure> {
        let deposit = deposit_of(trade)?;
        let calendar = calendar_of(deposit, reference_data)?;
        let valuation = market_data.valuation_date();

        let mut flows = Vec::with_capacity(2);
        let pay_start = calendar.adjust_following(deposit.start_date());
        if pay_start >= valuation {
            flows.push(CashFlow::new(
                pay_start,
                deposit.currency(),
                -deposit.notional(),
            ));
        }
        let pay_end = calendar.adjust_following(deposit.end_date());
        if pay_end >= valuation {
            flows.push(CashFlow::new(
                pay_end,
                deposit.currency(),
                deposit.maturity_amount(),
            ));
        }
        Ok(CellValue::CashFlows(flows))
    }
}
