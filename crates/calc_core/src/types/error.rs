//! Error types for date and currency handling.

use thiserror::Error;

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse a date string
///
/// # Examples
/// ```
/// use calc_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2026, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2026-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse a date string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

/// Currency-related errors.
///
/// # Variants
/// - `UnknownCurrency`: Unknown currency code
/// - `ParseError`: Failed to parse a currency or pair string
/// - `SameCurrency`: Base and quote currencies of a pair are the same
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Unknown currency code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Failed to parse a currency or currency pair string.
    #[error("Currency parse error: {0}")]
    ParseError(String),

    /// Base and quote currencies are the same.
    #[error("Base and quote currencies are the same: {0}")]
    SameCurrency(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_display() {
        let err = DateError::InvalidDate {
            year: 2026,
            month: 2,
            day: 30,
        };
        assert_eq!(format!("{}", err), "Invalid date: 2026-2-30");
    }

    #[test]
    fn test_date_parse_error_display() {
        let err = DateError::ParseError("not a date".to_string());
        assert_eq!(format!("{}", err), "Date parse error: not a date");
    }

    #[test]
    fn test_unknown_currency_display() {
        let err = CurrencyError::UnknownCurrency("XYZ".to_string());
        assert_eq!(format!("{}", err), "Unknown currency: XYZ");
    }

    #[test]
    fn test_same_currency_display() {
        let err = CurrencyError::SameCurrency("USD".to_string());
        assert_eq!(
            format!("{}", err),
            "Base and quote currencies are the same: USD"
        );
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = DateError::ParseError("x".to_string());
        let _: &dyn std::error::Error = &err;
        let err = CurrencyError::UnknownCurrency("x".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_clone_and_equality() {
        let err1 = CurrencyError::UnknownCurrency("XYZ".to_string());
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
