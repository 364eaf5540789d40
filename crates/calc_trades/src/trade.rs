//! Trade structure wrapping a product payload with metadata.

use calc_core::types::ids::{CounterpartyId, TradeId};
use calc_core::types::time::Date;
use calc_core::types::Currency;

use crate::products::{Product, ProductType};

/// Trade metadata independent of the product payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeInfo {
    counterparty: CounterpartyId,
    trade_date: Date,
}

impl TradeInfo {
    /// Creates trade metadata.
    pub fn new(counterparty: CounterpartyId, trade_date: Date) -> Self {
        Self {
            counterparty,
            trade_date,
        }
    }

    /// Returns the counterparty identifier.
    #[inline]
    pub fn counterparty(&self) -> &CounterpartyId {
        &self.counterparty
    }

    /// Returns the trade date.
    #[inline]
    pub fn trade_date(&self) -> Date {
        self.trade_date
    }
}

/// An immutable trade: identifier, metadata and product payload.
///
/// Trades are constructed by the caller before a run and are read-only to
/// the engine.
///
/// # Examples
///
/// ```
/// use calc_trades::{Trade, TradeInfo};
/// use calc_trades::products::{Product, ProductType, TermDeposit};
/// use calc_core::types::{CalendarId, CounterpartyId, Currency, Date, DayCount, TradeId};
///
/// let deposit = TermDeposit::new(
///     Currency::USD,
///     1_000_000.0,
///     0.025,
///     Date::from_ymd(2026, 1, 15).unwrap(),
///     Date::from_ymd(2026, 7, 15).unwrap(),
///     DayCount::Act360,
///     CalendarId::new("USNY"),
/// )
/// .unwrap();
///
/// let trade = Trade::new(
///     TradeId::new("T001"),
///     TradeInfo::new(CounterpartyId::new("CP001"), Date::from_ymd(2026, 1, 13).unwrap()),
///     Product::TermDeposit(deposit),
/// );
///
/// assert_eq!(trade.id().as_str(), "T001");
/// assert_eq!(trade.product_type(), ProductType::TermDeposit);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    id: TradeId,
    info: TradeInfo,
    product: Product,
}

impl Trade {
    /// Creates a new trade.
    pub fn new(id: TradeId, info: TradeInfo, product: Product) -> Self {
        Self { id, info, product }
    }

    /// Returns the trade identifier.
    #[inline]
    pub fn id(&self) -> &TradeId {
        &self.id
    }

    /// Returns the trade metadata.
    #[inline]
    pub fn info(&self) -> &TradeInfo {
        &self.info
    }

    /// Returns the product payload.
    #[inline]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Returns the product type tag used for dispatch.
    #[inline]
    pub fn product_type(&self) -> ProductType {
        self.product.product_type()
    }

    /// Returns the product's denomination currency.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.product.currency()
    }
}
