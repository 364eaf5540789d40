//! Yield curve abstractions.
//!
//! This module provides:
//! - [`YieldCurve`]: Generic trait for discount factor and rate calculations
//! - [`FlatCurve`]: Constant rate yield curve implementation
//! - [`ZeroCurve`]: Pillar-based curve, linear in zero rates
//! - [`CurveEnum`]: Static dispatch enum wrapping concrete curve implementations

mod curve_enum;
mod flat;
mod traits;
mod zero;

pub use curve_enum::CurveEnum;
pub use flat::FlatCurve;
pub use traits::YieldCurve;
pub use zero::ZeroCurve;
