//! Abstract market data requirement keys and requirement sets.
//!
//! A requirement names a market data need without resolving it to a
//! value: "the discount curve for USD", not "the USD-OIS curve object".
//! Requirements from many (trade, measure) pairs are unioned and
//! deduplicated before resolution so each key is resolved at most once
//! per run.

use std::collections::BTreeSet;
use std::fmt;

use calc_core::types::ids::{CurveId, IndexId, SurfaceId};
use calc_core::types::{Currency, CurrencyPair};

/// An abstract market data requirement key.
///
/// # Variants
///
/// - `DiscountCurve`: discounting curve for a currency
/// - `ForwardCurve`: projection curve for a floating rate index
/// - `FxRate`: spot rate for a currency pair
/// - `IndexFixings`: historical fixing series for an index
/// - `Volatility`: a named volatility surface
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarketDataRequirement {
    /// Discounting curve for a currency.
    DiscountCurve(Currency),
    /// Projection curve for a floating rate index.
    ForwardCurve(IndexId),
    /// Spot FX rate for a currency pair.
    FxRate(CurrencyPair),
    /// Historical fixing series for a floating rate index.
    IndexFixings(IndexId),
    /// Volatility surface by name.
    Volatility(SurfaceId),
}

impl fmt::Display for MarketDataRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketDataRequirement::DiscountCurve(ccy) => write!(f, "discount curve {}", ccy),
            MarketDataRequirement::ForwardCurve(idx) => write!(f, "forward curve {}", idx),
            MarketDataRequirement::FxRate(pair) => write!(f, "fx rate {}", pair),
            MarketDataRequirement::IndexFixings(idx) => write!(f, "fixings {}", idx),
            MarketDataRequirement::Volatility(id) => write!(f, "volatility surface {}", id),
        }
    }
}

/// A concrete market data identifier bound by a resolution rule.
///
/// Where a [`MarketDataRequirement`] is abstract ("discount curve for
/// USD"), a `MarketDataId` names an entry in the snapshot ("curve
/// USD-OIS").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarketDataId {
    /// A named yield curve in the snapshot.
    Curve(CurveId),
    /// An FX rate keyed by currency pair.
    FxRate(CurrencyPair),
    /// A fixing series keyed by index.
    Fixings(IndexId),
    /// A named volatility surface in the snapshot.
    Surface(SurfaceId),
}

impl fmt::Display for MarketDataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketDataId::Curve(id) => write!(f, "curve {}", id),
            MarketDataId::FxRate(pair) => write!(f, "fx rate {}", pair),
            MarketDataId::Fixings(idx) => write!(f, "fixings {}", idx),
            MarketDataId::Surface(id) => write!(f, "surface {}", id),
        }
    }
}

/// A deduplicated set of market data requirements.
///
/// Backed by a B-tree set so iteration order is stable, which keeps
/// resolution deterministic and makes requirement sets comparable by
/// equality regardless of collection order.
///
/// # Examples
///
/// ```
/// use calc_market::requirements::{MarketDataRequirement, MarketDataRequirements};
/// use calc_core::types::Currency;
///
/// let mut a = MarketDataRequirements::new();
/// a.add(MarketDataRequirement::DiscountCurve(Currency::USD));
/// a.add(MarketDataRequirement::DiscountCurve(Currency::USD));
/// assert_eq!(a.len(), 1);
///
/// let mut b = MarketDataRequirements::new();
/// b.add(MarketDataRequirement::DiscountCurve(Currency::EUR));
/// a.union(b);
/// assert_eq!(a.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketDataRequirements {
    set: BTreeSet<MarketDataRequirement>,
}

impl MarketDataRequirements {
    /// Creates an empty requirement set.
    pub fn new() -> Self {
        Self {
            set: BTreeSet::new(),
        }
    }

    /// Adds a requirement; duplicates are absorbed.
    pub fn add(&mut self, requirement: MarketDataRequirement) {
        self.set.insert(requirement);
    }

    /// Builder-style add.
    pub fn with(mut self, requirement: MarketDataRequirement) -> Self {
        self.add(requirement);
        self
    }

    /// Absorbs all requirements from `other`.
    pub fn union(&mut self, other: MarketDataRequirements) {
        self.set.extend(other.set);
    }

    /// Returns whether the set contains `requirement`.
    pub fn contains(&self, requirement: &MarketDataRequirement) -> bool {
        self.set.contains(requirement)
    }

    /// Returns the number of distinct requirements.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Iterates over requirements in stable (ordered) sequence.
    pub fn iter(&self) -> impl Iterator<Item = &MarketDataRequirement> {
        self.set.iter()
    }
}

impl FromIterator<MarketDataRequirement> for MarketDataRequirements {
    fn from_iter<I: IntoIterator<Item = MarketDataRequirement>>(iter: I) -> Self {
        Self {
            set: iter.into_iter().collect(),
        }
    }
}
