//! # calc_measures: Standard Measure Functions for Calcgrid
//!
//! Implements the [`calc_engine::CalculationFunction`] contract for the
//! built-in products, one function per (product type, measure) pair:
//!
//! - [`term_deposit`]: PresentValue, ParRate, PV01, BucketedPV01,
//!   CashFlows for fixed-rate term deposits
//! - [`swap`]: the same measure set for fixed/float interest rate swaps
//!
//! [`standard_registry`] wires every pair into a ready-to-use
//! [`calc_engine::MeasureRegistry`].
//!
//! Pricing conventions shared by all functions:
//!
//! - curve times are year fractions from the valuation date (Act/365F);
//! - payment dates are business-day adjusted (Following) against the
//!   product's calendar from reference data;
//! - flows paying on or after the valuation date are included;
//! - PV01 measures are +1bp bump-and-revalue against the discount curve.

pub mod registry;
pub mod swap;
pub mod term_deposit;

pub use registry::standard_registry;
