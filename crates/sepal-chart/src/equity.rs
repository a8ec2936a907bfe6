use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use sepal_types::EquityPoint;

/// One row of the stacked growth chart: running totals up to and including
/// the source point's date.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeSeriesRow {
    pub date: NaiveDate,
    pub portfolio: f64,
    /// Running total per discovered account, in discovery order
    pub accounts: Vec<(String, f64)>,
}

impl CumulativeSeriesRow {
    pub fn value(&self, key: &str) -> Option<f64> {
        self.accounts
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, total)| *total)
    }
}

// Flattened so chart libraries can address each account as its own data key
impl Serialize for CumulativeSeriesRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.accounts.len()))?;
        map.serialize_entry("date", &self.date)?;
        map.serialize_entry("portfolio", &self.portfolio)?;
        for (name, total) in &self.accounts {
            map.serialize_entry(name, total)?;
        }
        map.end()
    }
}

/// Offset at which the portfolio area gradient fades out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientStop {
    Percent(i64),
    /// Series has no usable spread (empty, or its maximum is zero): draw a
    /// single-colour fill.
    Flat,
}

impl fmt::Display for GradientStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(pct) => write!(f, "{pct}%"),
            Self::Flat => f.write_str("100%"),
        }
    }
}

impl Serialize for GradientStop {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Everything the growth chart needs for one render pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityChart {
    pub keys: Vec<String>,
    pub rows: Vec<CumulativeSeriesRow>,
    pub gradient_stop: GradientStop,
    pub multiple_series: bool,
}

impl EquityChart {
    pub fn from_points(points: &[EquityPoint]) -> Self {
        let keys = discover_account_keys(points);
        let multiple_series = keys.len() > 1;

        Self {
            rows: accumulate_with_keys(points, &keys),
            keys,
            gradient_stop: gradient_stop(points),
            multiple_series,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Unique account names across all points, in order of first appearance
pub fn discover_account_keys(points: &[EquityPoint]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();

    for point in points {
        for account in &point.accounts {
            if seen.insert(account.name.as_str()) {
                keys.push(account.name.clone());
            }
        }
    }

    keys
}

/// Builds the cumulative series, one row per input point.
///
/// NOTE: points must be pre-sorted in chronological order (oldest first)
pub fn accumulate(points: &[EquityPoint]) -> Vec<CumulativeSeriesRow> {
    let keys = discover_account_keys(points);
    accumulate_with_keys(points, &keys)
}

fn accumulate_with_keys(points: &[EquityPoint], keys: &[String]) -> Vec<CumulativeSeriesRow> {
    let mut portfolio_total = 0.0;
    let mut key_totals = vec![0.0; keys.len()];

    points
        .iter()
        .map(|point| {
            portfolio_total += point.normalized;
            for (key, total) in keys.iter().zip(key_totals.iter_mut()) {
                *total += point.account_value(key);
            }

            CumulativeSeriesRow {
                date: point.date,
                portfolio: portfolio_total,
                accounts: keys.iter().cloned().zip(key_totals.iter().copied()).collect(),
            }
        })
        .collect()
}

/// `round(((max - min) / max) * 100)` over the normalized values
pub fn gradient_stop(points: &[EquityPoint]) -> GradientStop {
    if points.is_empty() {
        return GradientStop::Flat;
    }

    let (min, max) = points.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), point| (min.min(point.normalized), max.max(point.normalized)),
    );

    if max == 0.0 {
        return GradientStop::Flat;
    }

    let pct = ((max - min) / max) * 100.0;
    if !pct.is_finite() {
        return GradientStop::Flat;
    }

    // Half rounds toward positive infinity
    GradientStop::Percent((pct + 0.5).floor() as i64)
}

/// Whether per-account areas are drawn next to the portfolio area
pub fn has_multiple_series(points: &[EquityPoint]) -> bool {
    discover_account_keys(points).len() > 1
}

/// Y-axis bounds with a 0.25% margin around the data, widening outward
/// whatever the sign
pub fn value_bounds(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some((min - min.abs() * 0.0025, max + max.abs() * 0.0025))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn two_account_series() -> Vec<EquityPoint> {
        vec![
            EquityPoint::new(date(1), 2.0).with_account("A", 2.0),
            EquityPoint::new(date(2), 3.0)
                .with_account("A", 1.0)
                .with_account("B", 2.0),
        ]
    }

    #[test]
    fn test_keys_and_rows_for_two_accounts() {
        let points = two_account_series();

        assert_eq!(discover_account_keys(&points), vec!["A", "B"]);

        let rows = accumulate(&points);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].portfolio, 2.0);
        assert_eq!(rows[0].value("A"), Some(2.0));
        assert_eq!(rows[0].value("B"), Some(0.0));
        assert_eq!(rows[1].portfolio, 5.0);
        assert_eq!(rows[1].value("A"), Some(3.0));
        assert_eq!(rows[1].value("B"), Some(2.0));
    }

    #[test]
    fn test_rows_serialize_flat() {
        let rows = accumulate(&two_account_series());
        let json = serde_json::to_value(&rows).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                { "date": "2024-01-01", "portfolio": 2.0, "A": 2.0, "B": 0.0 },
                { "date": "2024-01-02", "portfolio": 5.0, "A": 3.0, "B": 2.0 }
            ])
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(discover_account_keys(&[]).is_empty());
        assert!(accumulate(&[]).is_empty());
        assert!(!has_multiple_series(&[]));
        assert_eq!(gradient_stop(&[]), GradientStop::Flat);
        assert!(EquityChart::from_points(&[]).is_empty());
    }

    #[test]
    fn test_keys_are_unique_in_first_appearance_order() {
        let points = vec![
            EquityPoint::new(date(1), 1.0)
                .with_account("Swing", 1.0)
                .with_account("Scalp", 0.0),
            EquityPoint::new(date(2), 1.0).with_account("Scalp", 1.0),
            EquityPoint::new(date(3), 1.0)
                .with_account("Futures", 1.0)
                .with_account("Swing", 1.0),
            EquityPoint::new(date(4), 1.0),
        ];

        assert_eq!(
            discover_account_keys(&points),
            vec!["Swing", "Scalp", "Futures"]
        );
    }

    #[test]
    fn test_late_key_carries_zero_until_first_contribution() {
        let points = vec![
            EquityPoint::new(date(1), 1.0).with_account("A", 1.0),
            EquityPoint::new(date(2), 1.0).with_account("A", 1.0),
            EquityPoint::new(date(3), 4.0).with_account("C", 4.0),
        ];

        let rows = accumulate(&points);
        assert_eq!(rows[0].value("C"), Some(0.0));
        assert_eq!(rows[1].value("C"), Some(0.0));
        assert_eq!(rows[2].value("C"), Some(4.0));
        assert_eq!(rows[2].value("A"), Some(2.0));
    }

    #[test]
    fn test_totals_non_decreasing_for_non_negative_input() {
        let points: Vec<EquityPoint> = (1..=20)
            .map(|day| {
                let point = EquityPoint::new(date(day), f64::from(day % 3))
                    .with_account("even", f64::from(day % 2));
                if day % 4 == 0 {
                    point.with_account("fourth", 0.25)
                } else {
                    point
                }
            })
            .collect();

        let rows = accumulate(&points);
        assert_eq!(rows.len(), points.len());
        for pair in rows.windows(2) {
            assert!(pair[1].portfolio >= pair[0].portfolio);
            for (key, _) in &pair[0].accounts {
                assert!(pair[1].value(key).unwrap() >= pair[0].value(key).unwrap());
            }
        }
    }

    #[test]
    fn test_negative_contributions_decrease_totals() {
        let points = vec![
            EquityPoint::new(date(1), 5.0).with_account("A", 5.0),
            EquityPoint::new(date(2), -7.0).with_account("A", -7.0),
        ];

        let rows = accumulate(&points);
        assert_eq!(rows[1].portfolio, -2.0);
        assert_eq!(rows[1].value("A"), Some(-2.0));
    }

    #[test]
    fn test_accumulate_is_idempotent() {
        let points = two_account_series();
        let cloned = points.clone();

        assert_eq!(accumulate(&points), accumulate(&points));
        assert_eq!(accumulate(&points), accumulate(&cloned));
    }

    #[test]
    fn test_gradient_stop() {
        let points = vec![
            EquityPoint::new(date(1), 2.0),
            EquityPoint::new(date(2), 8.0),
            EquityPoint::new(date(3), 5.0),
        ];
        // (8 - 2) / 8 = 75%
        assert_eq!(gradient_stop(&points), GradientStop::Percent(75));
        assert_eq!(gradient_stop(&points).to_string(), "75%");

        let rounding = vec![EquityPoint::new(date(1), 1.0), EquityPoint::new(date(2), 8.0)];
        // 87.5 rounds up
        assert_eq!(gradient_stop(&rounding), GradientStop::Percent(88));
    }

    #[test]
    fn test_gradient_stop_zero_max_is_flat() {
        let points = vec![EquityPoint::new(date(1), 0.0), EquityPoint::new(date(2), -3.0)];
        assert_eq!(gradient_stop(&points), GradientStop::Flat);
        assert_eq!(gradient_stop(&points).to_string(), "100%");
    }

    #[test]
    fn test_multiple_series() {
        assert!(has_multiple_series(&two_account_series()));

        let single = vec![EquityPoint::new(date(1), 1.0).with_account("A", 1.0)];
        assert!(!has_multiple_series(&single));
    }

    #[test]
    fn test_chart_bundle() {
        let chart = EquityChart::from_points(&two_account_series());
        assert_eq!(chart.keys, vec!["A", "B"]);
        assert!(chart.multiple_series);
        assert_eq!(chart.rows.len(), 2);
        // (3 - 2) / 3 = 33.3%
        assert_eq!(chart.gradient_stop, GradientStop::Percent(33));

        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["gradientStop"], "33%");
        assert_eq!(json["multipleSeries"], true);
    }

    #[test]
    fn test_value_bounds() {
        assert_eq!(value_bounds(&[]), None);

        let (low, high) = value_bounds(&[100.0, 400.0, 200.0]).unwrap();
        assert!((low - 99.75).abs() < 1e-9);
        assert!((high - 401.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_bounds_contain_negative_totals() {
        let (low, high) = value_bounds(&[-10.0, -2.0]).unwrap();
        assert!((low - -10.025).abs() < 1e-9);
        assert!((high - -1.995).abs() < 1e-9);

        let (low, high) = value_bounds(&[-40.0, 0.0, 120.0]).unwrap();
        assert!(low < -40.0);
        assert!(high > 120.0);

        assert_eq!(value_bounds(&[0.0]), Some((0.0, 0.0)));
    }
}
