//! Strongly-typed identifiers for trades, market data and reference data.
//!
//! Using newtypes ensures type safety and prevents accidental misuse of
//! identifiers (a curve name can never be passed where a trade id is
//! expected). All identifiers are cheap string wrappers with a stable
//! total order so they can key both hash maps and B-tree sets.

use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from anything string-like.
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Unique identifier for a trade.
    ///
    /// # Examples
    ///
    /// ```
    /// use calc_core::types::TradeId;
    ///
    /// let id = TradeId::new("TRADE001");
    /// assert_eq!(id.as_str(), "TRADE001");
    /// ```
    TradeId
);

string_id!(
    /// Unique identifier for a counterparty.
    CounterpartyId
);

string_id!(
    /// Name of a yield curve in a market data snapshot (e.g. `"USD-OIS"`).
    ///
    /// # Examples
    ///
    /// ```
    /// use calc_core::types::CurveId;
    ///
    /// let id = CurveId::new("USD-OIS");
    /// assert_eq!(id.as_str(), "USD-OIS");
    /// ```
    CurveId
);

string_id!(
    /// Name of a floating rate index (e.g. `"USD-SOFR"`, `"EUR-EURIBOR-6M"`).
    IndexId
);

string_id!(
    /// Name of a volatility surface in a market data snapshot.
    SurfaceId
);

string_id!(
    /// Name of a holiday calendar in the reference data store.
    CalendarId
);

string_id!(
    /// Unique identifier for a security definition.
    SecurityId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashSet};

    #[test]
    fn test_trade_id_creation() {
        let id = TradeId::new("TRADE001");
        assert_eq!(id.as_str(), "TRADE001");
    }

    #[test]
    fn test_from_str_and_string() {
        let a: CurveId = "USD-OIS".into();
        let b: CurveId = String::from("USD-OIS").into();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display() {
        let id = IndexId::new("USD-SOFR");
        assert_eq!(format!("{}", id), "USD-SOFR");
    }

    #[test]
    fn test_hash_set_dedup() {
        let mut set = HashSet::new();
        set.insert(TradeId::new("T1"));
        set.insert(TradeId::new("T2"));
        set.insert(TradeId::new("T1"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_btree_ordering() {
        let mut set = BTreeSet::new();
        set.insert(CurveId::new("B"));
        set.insert(CurveId::new("A"));
        let names: Vec<_> = set.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_distinct_types_do_not_compare() {
        // Compile-time property: CurveId and IndexId are different types.
        let curve = CurveId::new("X");
        let index = IndexId::new("X");
        assert_eq!(curve.as_str(), index.as_str());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_transparent() {
        let id = CurveId::new("USD-OIS");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"USD-OIS\"");
    }
}
