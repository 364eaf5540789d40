//! # calc_trades: Trade Model for the Calcgrid Calculation Engine
//!
//! Provides the immutable trade representation consumed by the engine:
//!
//! - [`trade::Trade`]: identifier + metadata + product payload
//! - [`products`]: the product variants (term deposit, interest rate swap)
//! - [`schedule`]: payment period generation by frequency
//!
//! Trades are plain values owned by the caller; the engine reads them and
//! never mutates them.

pub mod products;
pub mod schedule;
pub mod trade;

pub use products::{Product, ProductError, ProductType};
pub use schedule::{Frequency, Schedule, ScheduleError, SchedulePeriod};
pub use trade::{Trade, TradeInfo};
