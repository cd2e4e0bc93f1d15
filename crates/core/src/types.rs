//! Core type aliases and shared records.

use serde::{Deserialize, Serialize};

/// All normalized timestamps are whole seconds since the Unix epoch.
/// The feed delivers milliseconds; conversion happens at the parsing
/// boundary, never later.
pub type EpochSeconds = i64;

/// Ducat/credit price pair attached to a trader offering.
///
/// The feed omits either field when it is zero, so both default to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePair {
    /// Ducat price (`PrimePrice` in the feed).
    #[serde(rename = "PrimePrice", default)]
    pub prime_price: i64,
    /// Credit price (`RegularPrice` in the feed).
    #[serde(rename = "RegularPrice", default)]
    pub regular_price: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_pair_defaults_missing_fields_to_zero() {
        let pair: PricePair = serde_json::from_str(r#"{"PrimePrice": 450}"#).unwrap();
        assert_eq!(pair.prime_price, 450);
        assert_eq!(pair.regular_price, 0);

        let pair: PricePair = serde_json::from_str("{}").unwrap();
        assert_eq!(pair.prime_price, 0);
        assert_eq!(pair.regular_price, 0);
    }

    #[test]
    fn price_pair_serializes_with_feed_field_names() {
        let pair = PricePair {
            prime_price: 100,
            regular_price: 50_000,
        };
        let json = serde_json::to_value(pair).unwrap();
        assert_eq!(json["PrimePrice"], 100);
        assert_eq!(json["RegularPrice"], 50_000);
    }
}
