use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::equity::EquityPoint;

/// Code/label pair the API uses for every enum it exposes
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumDisplay {
    pub code: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HealthCheck {
    pub domain: String,
    pub base_api_domain: String,
    pub version: String,
    pub api_version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioStatistics {
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub delta_net_worth: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub delta_trades: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub delta_deposits: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub delta_withdrawals: f64,
}

/// Portfolio snapshot backing the growth chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioRecord {
    pub new_portfolio: bool,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub net_worth: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub trades: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub deposits: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub withdrawals: f64,
    pub statistics: PortfolioStatistics,
    #[serde(deserialize_with = "deserialize_equity")]
    pub equity: Vec<EquityPoint>,
}

pub(crate) fn coerce_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

pub(crate) fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

pub(crate) fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Parses `YYYY-MM-DDTHH:mm:ss[.fff]`, anything else becomes `None`
pub(crate) fn deserialize_lenient_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(|raw| {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
            .ok()
    }))
}

fn deserialize_equity<'de, D>(deserializer: D) -> Result<Vec<EquityPoint>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(crate::equity::decode_equity_points(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_portfolio_record_decodes_equity_leniently() {
        let record: PortfolioRecord = serde_json::from_value(json!({
            "netWorth": "10500.25",
            "statistics": { "deltaNetWorth": 2.5 },
            "equity": [
                { "date": "2024-01-01", "normalized": 1, "accounts": { "A": 1 } },
                { "normalized": 1 }
            ]
        }))
        .unwrap();

        assert_eq!(record.net_worth, 10500.25);
        assert_eq!(record.statistics.delta_net_worth, 2.5);
        assert_eq!(record.equity.len(), 1);
        assert!(!record.new_portfolio);
    }

    #[test]
    fn test_portfolio_record_with_null_equity() {
        let record: PortfolioRecord =
            serde_json::from_value(json!({ "equity": null, "trades": null })).unwrap();
        assert!(record.equity.is_empty());
        assert_eq!(record.trades, 0.0);
    }
}
