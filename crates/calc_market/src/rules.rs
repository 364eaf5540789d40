//! Market data resolution rules.
//!
//! Rules map abstract requirement keys to concrete snapshot identifiers.
//! A rule chain is ordered: the first rule that claims a requirement
//! supplies the binding (first-match-wins); later rules are not
//! consulted for that requirement. A requirement no rule claims is a
//! resolution failure naming the missing key.

use calc_core::types::ids::{CurveId, SurfaceId};

use crate::requirements::{MarketDataId, MarketDataRequirement};

/// Glob match supporting `*` (match all) and a trailing `*` prefix
/// wildcard; anything else is an exact match.
pub(crate) fn glob_match(pattern: &str, value: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    if let Some(prefix) = pattern.strip_suffix('*') {
        return value.starts_with(prefix);
    }
    pattern == value
}

/// A single resolution rule.
///
/// Each variant claims one requirement kind by matching a glob pattern
/// against the requirement's key, and supplies the concrete identifier
/// to bind. FX rates and fixing series are stored in the snapshot under
/// the same key that names them in the requirement, so those rules act
/// as pattern-gated passthroughs.
///
/// # Examples
///
/// ```
/// use calc_market::rules::MarketDataRule;
/// use calc_market::requirements::{MarketDataId, MarketDataRequirement};
/// use calc_core::types::{Currency, CurveId};
///
/// let rule = MarketDataRule::discount_curve("USD", CurveId::new("USD-OIS"));
/// let req = MarketDataRequirement::DiscountCurve(Currency::USD);
/// assert_eq!(
///     rule.resolve(&req),
///     Some(MarketDataId::Curve(CurveId::new("USD-OIS")))
/// );
///
/// let other = MarketDataRequirement::DiscountCurve(Currency::EUR);
/// assert_eq!(rule.resolve(&other), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketDataRule {
    /// Binds discount curve requirements for matching currencies.
    DiscountCurve {
        /// Glob pattern over currency codes (e.g. `"USD"`, `"*"`)
        currency_pattern: String,
        /// The snapshot curve to bind
        curve: CurveId,
    },
    /// Binds forward curve requirements for matching indices.
    ForwardCurve {
        /// Glob pattern over index names (e.g. `"USD-SOFR"`, `"USD-*"`)
        index_pattern: String,
        /// The snapshot curve to bind
        curve: CurveId,
    },
    /// Claims FX rate requirements for matching pairs.
    FxRate {
        /// Glob pattern over pair notation (e.g. `"EUR/USD"`, `"*"`)
        pair_pattern: String,
    },
    /// Claims fixing series requirements for matching indices.
    IndexFixings {
        /// Glob pattern over index names
        index_pattern: String,
    },
    /// Binds volatility surface requirements for matching surface names.
    Volatility {
        /// Glob pattern over requested surface names
        surface_pattern: String,
        /// The snapshot surface to bind
        surface: SurfaceId,
    },
}

impl MarketDataRule {
    /// Creates a discount curve rule.
    pub fn discount_curve(currency_pattern: impl Into<String>, curve: CurveId) -> Self {
        MarketDataRule::DiscountCurve {
            currency_pattern: currency_pattern.into(),
            curve,
        }
    }

    /// Creates a forward curve rule.
    pub fn forward_curve(index_pattern: impl Into<String>, curve: CurveId) -> Self {
        MarketDataRule::ForwardCurve {
            index_pattern: index_pattern.into(),
            curve,
        }
    }

    /// Creates an FX rate rule.
    pub fn fx_rate(pair_pattern: impl Into<String>) -> Self {
        MarketDataRule::FxRate {
            pair_pattern: pair_pattern.into(),
        }
    }

    /// Creates an index fixings rule.
    pub fn index_fixings(index_pattern: impl Into<String>) -> Self {
        MarketDataRule::IndexFixings {
            index_pattern: index_pattern.into(),
        }
    }

    /// Creates a volatility surface rule.
    pub fn volatility(surface_pattern: impl Into<String>, surface: SurfaceId) -> Self {
        MarketDataRule::Volatility {
            surface_pattern: surface_pattern.into(),
            surface,
        }
    }

    /// Attempts to claim `requirement`, returning the bound identifier.
    ///
    /// Returns `None` when the rule does not apply (wrong kind or
    /// non-matching pattern).
    pub fn resolve(&self, requirement: &MarketDataRequirement) -> Option<MarketDataId> {
        match (self, requirement) {
            (
                MarketDataRule::DiscountCurve {
                    currency_pattern,
                    curve,
                },
                MarketDataRequirement::DiscountCurve(ccy),
            ) if glob_match(currency_pattern, ccy.code()) => {
                Some(MarketDataId::Curve(curve.clone()))
            }
            (
                MarketDataRule::ForwardCurve {
                    index_pattern,
                    curve,
                },
                MarketDataRequirement::ForwardCurve(index),
            ) if glob_match(index_pattern, index.as_str()) => {
                Some(MarketDataId::Curve(curve.clone()))
            }
            (
                MarketDataRule::FxRate { pair_pattern },
                MarketDataRequirement::FxRate(pair),
            ) if glob_match(pair_pattern, &pair.to_string()) => {
                Some(MarketDataId::FxRate(*pair))
            }
            (
                MarketDataRule::IndexFixings { index_pattern },
                MarketDataRequirement::IndexFixings(index),
            ) if glob_match(index_pattern, index.as_str()) => {
                Some(MarketDataId::Fixings(index.clone()))
            }
            (
                MarketDataRule::Volatility {
                    surface_pattern,
                    surface,
                },
                MarketDataRequirement::Volatility(requested),
            ) if glob_match(surface_pattern, requested.as_str()) => {
                Some(MarketDataId::Surface(surface.clone()))
            }
            _ => None,
        }
    }
}

/// An ordered chain of resolution rules.
///
/// Resolution walks the chain in order and the first rule that claims a
/// requirement wins. Overlapping claims are legal; priority is chain
/// order and no conflict diagnostics are produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketDataRules {
    rules: Vec<MarketDataRule>,
}

impl MarketDataRules {
    /// Creates an empty rule chain.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule, builder style.
    pub fn with_rule(mut self, rule: MarketDataRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends multiple rules, builder style.
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = MarketDataRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Returns the rules in priority order.
    pub fn rules(&self) -> &[MarketDataRule] {
        &self.rules
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolves a requirement against the chain, first match wins.
    pub fn resolve(&self, requirement: &MarketDataRequirement) -> Option<MarketDataId> {
        self.rules.iter().find_map(|rule| rule.resolve(requirement))
    }
}
