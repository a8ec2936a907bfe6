use std::fmt;

use chrono::NaiveDate;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::common::{coerce_f64, deserialize_lenient_f64};

/// Value contributed by a single account at a given date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountValue {
    pub name: String,
    pub value: f64,
}

/// One dated sample of a portfolio growth series.
///
/// Decoding is lenient: a missing or non-numeric `normalized`/`portfolio`
/// becomes `0.0` and a missing or malformed `accounts` becomes empty, so
/// consumers never need to coalesce again. `accounts` keeps document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    #[serde(deserialize_with = "deserialize_point_date")]
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub portfolio: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub normalized: f64,
    #[serde(default, deserialize_with = "deserialize_accounts")]
    pub accounts: Vec<AccountValue>,
}

impl EquityPoint {
    pub fn new(date: NaiveDate, normalized: f64) -> Self {
        Self {
            date,
            portfolio: 0.0,
            normalized,
            accounts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_account(mut self, name: impl Into<String>, value: f64) -> Self {
        self.accounts.push(AccountValue {
            name: name.into(),
            value,
        });
        self
    }

    /// Value of the named account at this point, `0.0` when absent
    pub fn account_value(&self, name: &str) -> f64 {
        self.accounts
            .iter()
            .find(|acc| acc.name == name)
            .map_or(0.0, |acc| acc.value)
    }
}

/// Decodes an equity series coming from the API.
///
/// Anything other than an array yields an empty series; individual points
/// that cannot be decoded are dropped.
pub fn decode_equity_points(value: Value) -> Vec<EquityPoint> {
    let Value::Array(items) = value else {
        if !value.is_null() {
            tracing::warn!("Equity payload is not an array, treating it as empty");
        }
        return Vec::new();
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(point) => Some(point),
            Err(e) => {
                tracing::warn!(index, error = %e, "Dropping malformed equity point");
                None
            }
        })
        .collect()
}

// Accepts both `2024-01-01` and `2024-01-01T00:00:00`
fn deserialize_point_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let date_part = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| de::Error::custom(format!("invalid equity point date '{raw}': {e}")))
}

fn deserialize_accounts<'de, D>(deserializer: D) -> Result<Vec<AccountValue>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(AccountsVisitor)
}

struct AccountsVisitor;

impl<'de> Visitor<'de> for AccountsVisitor {
    type Value = Vec<AccountValue>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of account values or a list of {name, value} entries")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut accounts = Vec::new();
        while let Some((name, value)) = map.next_entry::<String, Value>()? {
            accounts.push(AccountValue {
                name,
                value: coerce_f64(&value),
            });
        }
        Ok(accounts)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut accounts = Vec::new();
        while let Some(entry) = seq.next_element::<Value>()? {
            let name = entry.get("name").and_then(Value::as_str);
            if let Some(name) = name {
                accounts.push(AccountValue {
                    name: name.to_string(),
                    value: entry.get("value").map_or(0.0, coerce_f64),
                });
            }
        }
        Ok(accounts)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }
}
