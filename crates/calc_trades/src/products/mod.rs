//! Product variants priced by the engine.
//!
//! Dispatch over products is tag-based: every product variant carries a
//! [`ProductType`] tag, and calculation functions are registered per
//! (product type, measure) pair. Adding a product means adding a variant
//! here and registering its functions; the engine itself never branches
//! on concrete product types.

pub mod swap;
pub mod term_deposit;

use std::fmt;

use thiserror::Error;

pub use swap::{FixedLeg, FloatingLeg, InterestRateSwap, SwapDirection};
pub use term_deposit::TermDeposit;

use calc_core::types::Currency;

/// Product construction errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProductError {
    /// Start date does not precede end date.
    #[error("Invalid product dates: start {start} must precede end {end}")]
    InvalidDates {
        /// Product start date
        start: calc_core::types::Date,
        /// Product end date
        end: calc_core::types::Date,
    },

    /// Notional is not strictly positive.
    #[error("Notional must be positive, got {0}")]
    NonPositiveNotional(f64),
}

/// Tag identifying a concrete product variant.
///
/// Used as half of the (product type, measure) registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProductType {
    /// Fixed-rate term deposit.
    TermDeposit,
    /// Fixed versus floating interest rate swap.
    Swap,
}

impl ProductType {
    /// Returns the stable name of the product type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::TermDeposit => "TermDeposit",
            ProductType::Swap => "Swap",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static dispatch enum over product payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum Product {
    /// Fixed-rate term deposit.
    TermDeposit(TermDeposit),
    /// Fixed versus floating interest rate swap.
    Swap(InterestRateSwap),
}

impl Product {
    /// Returns the tag for this product variant.
    pub fn product_type(&self) -> ProductType {
        match self {
            Product::TermDeposit(_) => ProductType::TermDeposit,
            Product::Swap(_) => ProductType::Swap,
        }
    }

    /// Returns the product's denomination currency.
    pub fn currency(&self) -> Currency {
        match self {
            Product::TermDeposit(d) => d.currency(),
            Product::Swap(s) => s.currency(),
        }
    }

    /// Returns the term deposit payload if this is a deposit.
    pub fn as_term_deposit(&self) -> Option<&TermDeposit> {
        match self {
            Product::TermDeposit(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the swap payload if this is a swap.
    pub fn as_swap(&self) -> Option<&InterestRateSwap> {
        match self {
            Product::Swap(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::types::{CalendarId, Date, DayCount};

    fn test_deposit() -> TermDeposit {
        TermDeposit::new(
            Currency::USD,
            1_000_000.0,
            0.025,
            Date::from_ymd(2026, 1, 15).unwrap(),
            Date::from_ymd(2026, 7, 15).unwrap(),
            DayCount::Act360,
            CalendarId::new("USNY"),
        )
        .unwrap()
    }

    #[test]
    fn test_product_type_tags() {
        let product = Product::TermDeposit(test_deposit());
        assert_eq!(product.product_type(), ProductType::TermDeposit);
        assert_eq!(product.currency(), Currency::USD);
    }

    #[test]
    fn test_product_type_display() {
        assert_eq!(ProductType::TermDeposit.to_string(), "TermDeposit");
        assert_eq!(ProductType::Swap.to_string(), "Swap");
    }

    #[test]
    fn test_as_term_deposit() {
        let product = Product::TermDeposit(test_deposit());
        assert!(product.as_term_deposit().is_some());
        assert!(product.as_swap().is_none());
    }
}
