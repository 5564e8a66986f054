use serde::{Deserialize, Serialize};

use super::{Symbol, Timestamp};

/// A priced-asset snapshot.
///
/// `price` and `market_cap` are stored as reported; negative or zero values
/// are passed through unvalidated. Identity is the natural key
/// (symbol, last_updated) and duplicates are not deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    pub symbol: Symbol,
    pub name: String,
    pub price: f64,
    pub market_cap: f64,
    pub last_updated: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_fields_and_plain_timestamp() {
        let ticker = Ticker {
            symbol: Symbol::parse("BTC").expect("symbol"),
            name: "Bitcoin".to_string(),
            price: 7500.5,
            market_cap: 128_000_000_000.0,
            last_updated: Timestamp::parse("2018-06-05 12:00:00").expect("timestamp"),
        };

        let json = serde_json::to_value(&ticker).expect("serialize");
        assert_eq!(json["symbol"], "BTC");
        assert_eq!(json["marketCap"], 128_000_000_000.0);
        assert_eq!(json["lastUpdated"], "2018-06-05 12:00:00");
    }
}
