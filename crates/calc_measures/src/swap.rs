//! Measure functions for fixed/float interest rate swaps.
//!
//! The fixed leg discounts `notional * rate * tau_i` per period; the
//! floating leg projects forward rates off the index forward curve,
//! except for periods that started before the valuation date, which
//! consume the historical fixing observed on the period start date.
//! Periods whose adjusted payment date falls before the valuation date
//! are settled and excluded.

use calc_core::market_data::curves::{CurveEnum, YieldCurve};
use calc_core::market_data::MarketDataError;
use calc_core::reference::{HolidayCalendar, ReferenceData};
use calc_market::requirements::{MarketDataRequirement, MarketDataRequirements};
use calc_market::resolved::ResolvedMarketData;
use calc_trades::products::InterestRateSwap;
use calc_trades::Trade;

use calc_engine::{
    CalculationFailure, CalculationFunction, CashFlow, CellValue, CurrencyAmount,
};

use crate::term_deposit::{bucketed_pv01, BUMP};

fn swap_of(trade: &Trade) -> Result<&InterestRateSwap, CalculationFailure> {
    trade
        .product()
        .as_swap()
        .ok_or_else(|| CalculationFailure::InvalidTrade("product is not a swap".to_string()))
}

fn calendar_of<'a>(
    swap: &InterestRateSwap,
    reference_data: &'a ReferenceData,
) -> Result<&'a HolidayCalendar, CalculationFailure> {
    reference_data
        .calendar_or_err(swap.calendar())
        .map_err(|e| CalculationFailure::InvalidTrade(e.to_string()))
}

fn swap_requirements(trade: &Trade) -> Result<MarketDataRequirements, CalculationFailure> {
    let swap = swap_of(trade)?;
    // The fixing series is always declared: the requirements capability
    // has no valuation date, so whether the first period has started
    // cannot be known during the planning pass.
    Ok(MarketDataRequirements::new()
        .with(MarketDataRequirement::DiscountCurve(swap.currency()))
        .with(MarketDataRequirement::ForwardCurve(
            swap.floating_leg().index().clone(),
        ))
        .with(MarketDataRequirement::IndexFixings(
            swap.floating_leg().index().clone(),
        )))
}

/// Discounted value of the fixed leg per unit fixed rate: the annuity
/// `sum(tau_i * df_i)` times notional.
fn fixed_annuity(
    swap: &InterestRateSwap,
    data: &ResolvedMarketData,
    calendar: &HolidayCalendar,
    discount: &CurveEnum<f64>,
) -> Result<f64, CalculationFailure> {
    let valuation = data.valuation_date();
    let leg = swap.fixed_leg();
    let mut annuity = 0.0;
    for period in leg.schedule().periods() {
        let pay = calendar.adjust_following(period.end());
        if pay < valuation {
            continue;
        }
        let tau = period.year_fraction(leg.day_count());
        let df = discount.discount_factor(data.time_from_valuation(pay))?;
        annuity += tau * df;
    }
    Ok(annuity * swap.notional())
}

/// Discounted value of the floating leg: projected or fixed rates times
/// accruals, discounted to the valuation date.
fn floating_leg_pv(
    swap: &InterestRateSwap,
    data: &ResolvedMarketData,
    calendar: &HolidayCalendar,
    discount: &CurveEnum<f64>,
) -> Result<f64, CalculationFailure> {
    let valuation = data.valuation_date();
    let leg = swap.floating_leg();
    let forward = data.forward_curve(leg.index())?;
    let mut pv = 0.0;
    for period in leg.schedule().periods() {
        let pay = calendar.adjust_following(period.end());
        if pay < valuation {
            continue;
        }
        let rate = if period.start() < valuation {
            // Period already accruing: the rate was observed on the
            // period start date.
            data.fixings(leg.index())?
                .get(period.start())
                .ok_or_else(|| MarketDataError::MissingFixing {
                    index: leg.index().as_str().to_string(),
                    date: period.start(),
                })?
        } else {
            let t1 = data.time_from_valuation(period.start());
            let t2 = data.time_from_valuation(period.end());
            forward.forward_rate(t1, t2)?
        };
        let tau = period.year_fraction(leg.day_count());
        let df = discount.discount_factor(data.time_from_valuation(pay))?;
        pv += rate * tau * df;
    }
    Ok(pv * swap.notional())
}

/// Present value of the swap against an explicit discount curve.
fn present_value_with_curve(
    swap: &InterestRateSwap,
    data: &ResolvedMarketData,
    calendar: &HolidayCalendar,
    discount: &CurveEnum<f64>,
) -> Result<f64, CalculationFailure> {
    let float_pv = floating_leg_pv(swap, data, calendar, discount)?;
    let fixed_pv = fixed_annuity(swap, data, calendar, discount)? * swap.fixed_leg().rate();
    Ok(swap.direction_sign() * (float_pv - fixed_pv))
}

/// PresentValue measure for swaps.
pub struct SwapPresentValue;

impl CalculationFunction for SwapPresentValue {
    fn requirements(&self, trade: &Trade) -> Result<MarketDataRequirements, CalculationFailure> {
        swap_requirements(trade)
    }

    fn calculate(
        &self,
        trade: &Trade,
        market_data: &ResolvedMarketData,
        reference_data: &ReferenceData,
    ) -> Result<CellValue, CalculationFailure> {
        let swap = swap_of(trade)?;
        let calendar = calendar_of(swap, reference_data)?;
        let discount = market_data.discount_curve(swap.currency())?;
        let pv = present_value_with_curve(swap, market_data, calendar, discount)?;
        Ok(CellValue::Amount(CurrencyAmount::new(swap.currency(), pv)))
    }
}

/// ParRate measure for swaps: floating leg value over the fixed annuity.
pub struct SwapParRate;

impl CalculationFunction for SwapParRate {
    fn requirements(&self, trade: &Trade) -> Result<MarketDataRequirements, CalculationFailure> {
        swap_requirements(trade)
    }

    fn calculate(
        &self,
        trade: &Trade,
        market_data: &ResolvedMarketData,
        reference_data: &ReferenceData,
    ) -> Result<CellValue, CalculationFailure> {
        let swap = swap_of(trade)?;
        let calendar = calendar_of(swap, reference_data)?;
        let discount = market_data.discount_curve(swap.currency())?;

        let annuity = fixed_annuity(swap, market_data, calendar, discount)?;
        if annuity.abs() < f64::EPSILON {
            return Err(CalculationFailure::InvalidTrade(
                "swap has no remaining fixed periods".to_string(),
            ));
        }
        let float_pv = floating_leg_pv(swap, market_data, calendar, discount)?;
        Ok(CellValue::Rate(float_pv / annuity))
    }
}

/// PV01 measure for swaps: +1bp parallel bump-and-revalue of the
/// discount curve.
pub struct SwapPv01;

impl CalculationFunction for SwapPv01 {
    fn requirements(&self, trade: &Trade) -> Result<MarketDataRequirements, CalculationFailure> {
        swap_requirements(trade)
    }

    fn calculate(
        &self,
        trade: &Trade,
        market_data: &ResolvedMarketData,
        reference_data: &ReferenceData,
    ) -> Result<CellValue, CalculationFailure> {
        let swap = swap_of(trade)?;
        let calendar = calendar_of(swap, reference_data)?;
        let discount = market_data.discount_curve(swap.currency())?;

        let base = present_value_with_curve(swap, market_data, calendar, discount)?;
        let bumped =
            present_value_with_curve(swap, market_data, calendar, &discount.parallel_shift(BUMP))?;
        Ok(CellValue::Amount(CurrencyAmount::new(
            swap.currency(),
            bumped - base,
        )))
    }
}

/// BucketedPV01 measure for swaps: +1bp per-pillar bumps of the
/// discount curve.
pub struct SwapBucketedPv01;

impl CalculationFunction for SwapBucketedPv01 {
    fn requirements(&self, trade: &Trade) -> Result<MarketDataRequirements, CalculationFailure> {
        swap_requirements(trade)
    }

    fn calculate(
        &self,
        trade: &Trade,
        market_data: &ResolvedMarketData,
        reference_data: &ReferenceData,
    ) -> Result<CellValue, CalculationFailure> {
        let swap = swap_of(trade)?;
        let calendar = calendar_of(swap, reference_data)?;
        let discount = market_data.discount_curve(swap.currency())?;
        let base = present_value_with_curve(swap, market_data, calendar, discount)?;

        let buckets = bucketed_pv01(discount, base, |bumped| {
            present_value_with_curve(swap, market_data, calendar, bumped)
        })?;
        Ok(CellValue::Bucketed(buckets))
    }
}

/// CashFlows measure for swaps: projected flows of both legs on
/// adjusted payment dates, signed from the trade's perspective.
pub struct SwapCashFlows;

impl CalculationFunction for SwapCashFlows {
    fn requirements(&self, trade: &Trade) -> Result<MarketDataRequirements, CalculationFailure> {
        swap_requirements(trade)
    }

    fn calculate(
        &self,
        trade: &Trade,
        market_data: &ResolvedMarketData,
        reference_data: &ReferenceData,
    ) -> Result<CellValue, CalculationFailure> {
        let swap = swap_of(trade)?;
        let calendar = calendar_of(swap, reference_data)?;
        let valuation = market_data.valuation_date();
        let sign = swap.direction_sign();

        let mut flows = Vec::new();

        let fixed = swap.fixed_leg();
        for period in fixed.schedule().periods() {
            let pay = calendar.adjust_following(period.end());
            if pay < valuation {
                continue;
            }
            let amount =
                -sign * swap.notional() * fixed.rate() * period.year_fraction(fixed.day_count());
            flows.push(CashFlow::new(pay, swap.currency(), amount));
        }

        let floating = swap.floating_leg();
        let forward = market_data.forward_curve(floating.index())?;
        for period in floating.schedule().periods() {
            let pay = calendar.adjust_following(period.end());
            if pay < valuation {
                continue;
            }
            let rate = if period.start() < valuation {
                market_data
                    .fixings(floating.index())?
                    .get(period.start())
                    .ok_or_else(|| MarketDataError::MissingFixing {
                        index: floating.index().as_str().to_string(),
                        date: period.start(),
                    })?
            } else {
                let t1 = market_data.time_from_valuation(period.start());
                let t2 = market_data.time_from_valuation(period.end());
                forward.forward_rate(t1, t2)?
            };
            let amount =
                sign * swap.notional() * rate * period.year_fraction(floating.day_count());
            flows.push(CashFlow::new(pay, swap.currency(), amount));
        }

        flows.sort_by_key(|f| f.payment_date());
        Ok(CellValue::CashFlows(flows))
    }
}
