//! # calc_core: Foundation Types for the Calcgrid Calculation Engine
//!
//! ## Role
//!
//! calc_core is the bottom layer of the workspace, providing:
//! - Time types: `Date`, `DayCount` (`types::time`)
//! - Currency types: `Currency`, `CurrencyPair` (`types::currency`)
//! - Strongly-typed identifiers: `TradeId`, `CurveId`, `IndexId`, ...
//!   (`types::ids`)
//! - Yield curves and volatility surfaces (`market_data`)
//! - Index fixing histories (`market_data::fixings`)
//! - Reference data: holiday calendars and security definitions
//!   (`reference`)
//! - Error types: `DateError`, `CurrencyError`, `MarketDataError`
//!
//! ## Dependency Principle
//!
//! calc_core has no dependencies on other calc_* crates, with minimal
//! external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Structured error types
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use calc_core::types::{Currency, Date, DayCount};
//! use calc_core::market_data::curves::{CurveEnum, YieldCurve};
//!
//! // Date operations
//! let start = Date::from_ymd(2026, 1, 15).unwrap();
//! let end = Date::from_ymd(2026, 7, 15).unwrap();
//! let tau = DayCount::Act360.year_fraction(start, end);
//! assert!((tau - 181.0 / 360.0).abs() < 1e-12);
//!
//! // Currency information
//! assert_eq!(Currency::USD.code(), "USD");
//!
//! // Curve lookups
//! let curve = CurveEnum::flat(0.03_f64);
//! let df = curve.discount_factor(1.0).unwrap();
//! assert!((df - (-0.03_f64).exp()).abs() < 1e-12);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod reference;
pub mod types;
