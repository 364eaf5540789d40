//! Measure identifiers.

use std::fmt;
use std::str::FromStr;

/// A named analytic quantity requested for a trade.
///
/// Measures are half of the (product type, measure) registry key. The
/// enumeration is fixed per release; extending it means adding a variant
/// and registering functions for it, never touching the runner.
///
/// # Examples
///
/// ```
/// use calc_engine::Measure;
///
/// assert_eq!(Measure::PresentValue.as_str(), "PresentValue");
/// let parsed: Measure = "ParRate".parse().unwrap();
/// assert_eq!(parsed, Measure::ParRate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Measure {
    /// Present value in the trade currency.
    PresentValue,
    /// The fixed rate that prices the trade to zero.
    ParRate,
    /// Present value change under a +1bp parallel shift of the discount
    /// curve.
    Pv01,
    /// Per-pillar present value changes under +1bp pillar bumps.
    BucketedPv01,
    /// The trade's projected cash flows.
    CashFlows,
}

impl Measure {
    /// Returns the stable name of the measure.
    pub fn as_str(&self) -> &'static str {
        match self {
            Measure::PresentValue => "PresentValue",
            Measure::ParRate => "ParRate",
            Measure::Pv01 => "PV01",
            Measure::BucketedPv01 => "BucketedPV01",
            Measure::CashFlows => "CashFlows",
        }
    }

    /// All measures, in display order.
    pub fn all() -> [Measure; 5] {
        [
            Measure::PresentValue,
            Measure::ParRate,
            Measure::Pv01,
            Measure::BucketedPv01,
            Measure::CashFlows,
        ]
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Measure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PresentValue" => Ok(Measure::PresentValue),
            "ParRate" => Ok(Measure::ParRate),
            "PV01" => Ok(Measure::Pv01),
            "BucketedPV01" => Ok(Measure::BucketedPv01),
            "CashFlows" => Ok(Measure::CashFlows),
            other => Err(format!("unknown measure: {}", other)),
        }
    }
}
