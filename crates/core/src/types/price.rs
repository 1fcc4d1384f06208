//! Type-safe price representation using decimal arithmetic.
//!
//! Prices use [`rust_decimal::Decimal`] rather than floats so amounts like
//! 19.99 survive serialization round trips exactly. The backend transmits a
//! single implicit store currency, so no currency code is carried here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in the store's display currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimal_places() {
        let price = Price::new(Decimal::new(199, 1));
        assert_eq!(price.to_string(), "19.90");
    }

    #[test]
    fn test_serde_round_trip() {
        let price = Price::new(Decimal::new(1999, 2));
        let json = serde_json::to_string(&price).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }

    #[test]
    fn test_deserializes_from_number() {
        let price: Price = serde_json::from_str("12.5").unwrap();
        assert_eq!(price.amount(), Decimal::new(125, 1));
    }
}
