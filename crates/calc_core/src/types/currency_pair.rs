//! Currency pair identifiers for FX market data.
//!
//! A [`CurrencyPair`] names an exchange rate in BASE/QUOTE convention:
//! one unit of the base currency is worth `rate` units of the quote
//! currency. The pair itself carries no rate; rates live in the market
//! data snapshot keyed by pair.

use std::fmt;
use std::str::FromStr;

use super::currency::Currency;
use super::error::CurrencyError;

/// An ordered currency pair used as an FX rate key.
///
/// # Examples
///
/// ```
/// use calc_core::types::{Currency, CurrencyPair};
///
/// let pair = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
/// assert_eq!(pair.base(), Currency::EUR);
/// assert_eq!(pair.quote(), Currency::USD);
/// assert_eq!(pair.to_string(), "EUR/USD");
///
/// let inverse = pair.inverse();
/// assert_eq!(inverse.base(), Currency::USD);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyPair {
    /// Base currency (one unit of this ...)
    base: Currency,
    /// Quote currency (... is worth `rate` units of this)
    quote: Currency,
}

impl CurrencyPair {
    /// Creates a new currency pair.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::SameCurrency` if base and quote are equal.
    pub fn new(base: Currency, quote: Currency) -> Result<Self, CurrencyError> {
        if base == quote {
            return Err(CurrencyError::SameCurrency(base.code().to_string()));
        }
        Ok(Self { base, quote })
    }

    /// Returns the base currency.
    #[inline]
    pub fn base(&self) -> Currency {
        self.base
    }

    /// Returns the quote currency.
    #[inline]
    pub fn quote(&self) -> Currency {
        self.quote
    }

    /// Returns the pair with base and quote swapped.
    #[inline]
    pub fn inverse(&self) -> Self {
        Self {
            base: self.quote,
            quote: self.base,
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = CurrencyError;

    /// Parses a pair from `BASE/QUOTE` notation, e.g. `"EUR/USD"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .split_once('/')
            .ok_or_else(|| CurrencyError::ParseError(format!("expected BASE/QUOTE, got {}", s)))?;
        CurrencyPair::new(base.parse()?, quote.parse()?)
    }
}
