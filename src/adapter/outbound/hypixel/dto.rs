//! Wire types for `GET /v2/skyblock/bazaar`.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::MarketQuote;

/// Top-level bazaar response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BazaarResponse {
    pub success: bool,
    /// Failure description when `success` is false.
    #[serde(default)]
    pub cause: Option<String>,
    /// Epoch milliseconds of the upstream refresh.
    #[serde(default)]
    pub last_updated: Option<i64>,
    #[serde(default)]
    pub products: HashMap<String, BazaarProduct>,
}

/// One product entry. Order-book summaries are ignored.
#[derive(Debug, Deserialize)]
pub struct BazaarProduct {
    pub quick_status: MarketQuote,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_bazaar_payload() {
        let json = r#"{
            "success": true,
            "lastUpdated": 1760000000000,
            "products": {
                "SHARD_WITHER": {
                    "product_id": "SHARD_WITHER",
                    "sell_summary": [],
                    "buy_summary": [{"amount": 3, "pricePerUnit": 51.0, "orders": 1}],
                    "quick_status": {
                        "productId": "SHARD_WITHER",
                        "sellPrice": 48.0,
                        "sellVolume": 7,
                        "sellMovingWeek": 90,
                        "sellOrders": 2,
                        "buyPrice": 50.0,
                        "buyVolume": 3,
                        "buyMovingWeek": 40,
                        "buyOrders": 1
                    }
                }
            }
        }"#;

        let response: BazaarResponse = serde_json::from_str(json).unwrap();

        assert!(response.success);
        assert_eq!(response.last_updated, Some(1_760_000_000_000));
        let quote = &response.products["SHARD_WITHER"].quick_status;
        assert_eq!(quote.sell_volume, 7);
        assert_eq!(quote.buy_price, Some(50.0));
    }

    #[test]
    fn deserializes_failure_payload() {
        let response: BazaarResponse =
            serde_json::from_str(r#"{"success": false, "cause": "Invalid API key"}"#).unwrap();

        assert!(!response.success);
        assert_eq!(response.cause.as_deref(), Some("Invalid API key"));
        assert!(response.products.is_empty());
    }
}
