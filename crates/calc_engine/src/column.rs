//! Grid column definitions.

use calc_core::types::Currency;

use crate::measure::Measure;

/// One requested output per trade: a measure plus optional reporting
/// configuration.
///
/// # Examples
///
/// ```
/// use calc_engine::{Column, Measure};
/// use calc_core::types::Currency;
///
/// let column = Column::of(Measure::PresentValue)
///     .with_header("PV (EUR)")
///     .with_reporting_currency(Currency::EUR);
///
/// assert_eq!(column.measure(), Measure::PresentValue);
/// assert_eq!(column.header(), "PV (EUR)");
/// assert_eq!(column.reporting_currency(), Some(Currency::EUR));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    measure: Measure,
    header: Option<String>,
    reporting_currency: Option<Currency>,
}

impl Column {
    /// Creates a column for a measure with default configuration.
    pub fn of(measure: Measure) -> Self {
        Self {
            measure,
            header: None,
            reporting_currency: None,
        }
    }

    /// Overrides the column header.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Requests amount results converted into `currency`.
    ///
    /// Conversion applies to currency amount cells only; rates, buckets
    /// and cash flow schedules are reported unconverted.
    pub fn with_reporting_currency(mut self, currency: Currency) -> Self {
        self.reporting_currency = Some(currency);
        self
    }

    /// Returns the requested measure.
    #[inline]
    pub fn measure(&self) -> Measure {
        self.measure
    }

    /// Returns the column header: the override if set, otherwise the
    /// measure name.
    pub fn header(&self) -> &str {
        self.header.as_deref().unwrap_or(self.measure.as_str())
    }

    /// Returns the reporting currency override, if any.
    #[inline]
    pub fn reporting_currency(&self) -> Option<Currency> {
        self.reporting_currency
    }
}
