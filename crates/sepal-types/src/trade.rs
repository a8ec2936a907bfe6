use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::{deserialize_lenient_datetime, deserialize_lenient_f64};
use crate::page::PagedEntity;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Trade {
    pub trade_id: String,
    pub product: String,
    pub trade_platform: String,
    pub trade_type: String,
    #[serde(deserialize_with = "deserialize_lenient_datetime")]
    pub trade_open_time: Option<NaiveDateTime>,
    #[serde(deserialize_with = "deserialize_lenient_datetime")]
    pub trade_close_time: Option<NaiveDateTime>,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub lot_size: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub open_price: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub close_price: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub net_profit: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub points: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub stop_loss: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub take_profit: f64,
}

impl PagedEntity for Trade {
    const ITEMS_KEY: &'static str = "trades";
    const TOTAL_KEY: &'static str = "totalTrades";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trade_decodes_times_and_tolerates_bad_ones() {
        let trade: Trade = serde_json::from_value(json!({
            "tradeId": "4451",
            "tradeOpenTime": "2024-05-01T09:30:00",
            "tradeCloseTime": "yesterday",
            "lotSize": "0.5",
            "account": { "accountNumber": 1 }
        }))
        .unwrap();

        assert_eq!(trade.trade_id, "4451");
        assert!(trade.trade_open_time.is_some());
        assert!(trade.trade_close_time.is_none());
        assert_eq!(trade.lot_size, 0.5);
    }
}
