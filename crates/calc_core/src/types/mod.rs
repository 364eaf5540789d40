//! Foundation value types: dates, currencies and identifiers.

pub mod currency;
pub mod currency_pair;
pub mod error;
pub mod ids;
pub mod time;

pub use currency::Currency;
pub use currency_pair::CurrencyPair;
pub use error::{CurrencyError, DateError};
pub use ids::{
    CalendarId, CounterpartyId, CurveId, IndexId, SecurityId, SurfaceId, TradeId,
};
pub use time::{Date, DayCount};
