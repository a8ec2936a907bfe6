use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::common::coerce_f64;

/// An entity the API serves through a paged envelope.
///
/// The envelope carries the entity list under an entity-specific key
/// (`trades`, `transactions`, `jobs`) next to the paging counters.
pub trait PagedEntity: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Key holding the item array in the envelope
    const ITEMS_KEY: &'static str;
    /// Entity-specific total counter, used when `totalElements` is absent
    const TOTAL_KEY: &'static str;
}

/// One page of results, fully defaulted at decode time
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub items: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: 0,
            total_pages: 0,
            total_elements: 0,
            items: Vec::new(),
        }
    }
}

impl<T> Page<T> {
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Last valid zero-based page index for this response
    pub const fn last_page(&self) -> u32 {
        self.total_pages.saturating_sub(1)
    }
}

impl<T: PagedEntity> Page<T> {
    /// Decodes the `data` of a paged response.
    ///
    /// Missing counters default to zero, a missing item array to empty, and
    /// items that fail to decode are dropped.
    pub fn decode(value: Value) -> Self {
        let Value::Object(mut envelope) = value else {
            if !value.is_null() {
                tracing::warn!(
                    items_key = T::ITEMS_KEY,
                    "Paged payload is not an object, treating it as an empty page"
                );
            }
            return Self::default();
        };

        let page = narrow(counter(&envelope, &["page", "currentPage"]));
        let page_size = narrow(counter(&envelope, &["pageSize"]));
        let total_pages = narrow(counter(&envelope, &["totalPages"]));
        let total_elements = counter(&envelope, &["totalElements", T::TOTAL_KEY]);

        let items = match envelope.remove(T::ITEMS_KEY) {
            Some(Value::Array(raw)) => raw
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        tracing::warn!(
                            items_key = T::ITEMS_KEY,
                            index,
                            error = %e,
                            "Dropping malformed paged item"
                        );
                        None
                    }
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            page,
            page_size,
            total_pages,
            total_elements,
            items,
        }
    }
}

fn narrow(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn counter(envelope: &Map<String, Value>, keys: &[&str]) -> u64 {
    keys.iter()
        .find_map(|key| envelope.get(*key))
        .map_or(0, |value| {
            let raw = coerce_f64(value);
            if raw.is_finite() && raw > 0.0 {
                raw as u64
            } else {
                0
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Trade;
    use serde_json::json;

    #[test]
    fn test_decode_full_envelope() {
        let page = Page::<Trade>::decode(json!({
            "page": 2,
            "pageSize": 10,
            "totalPages": 5,
            "totalElements": 47,
            "trades": [
                { "tradeId": "T-1", "product": "NDX", "netProfit": 120.5 },
                { "tradeId": "T-2", "product": "SPX", "netProfit": -40 }
            ]
        }));

        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.total_elements, 47);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].net_profit, -40.0);
        assert_eq!(page.last_page(), 4);
    }

    #[test]
    fn test_decode_legacy_counter_names() {
        let page = Page::<Trade>::decode(json!({
            "currentPage": 1,
            "pageSize": 25,
            "totalPages": 3,
            "totalTrades": 60,
            "trades": []
        }));

        assert_eq!(page.page, 1);
        assert_eq!(page.total_elements, 60);
        assert!(page.is_empty());
    }

    #[test]
    fn test_decode_defaults_missing_parts() {
        let page = Page::<Trade>::decode(json!({ "totalPages": 2 }));
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page_size, 0);
        assert!(page.items.is_empty());

        assert_eq!(Page::<Trade>::decode(json!(null)), Page::default());
        assert_eq!(Page::<Trade>::decode(json!([1, 2])), Page::default());
    }

    #[test]
    fn test_decode_saturates_oversized_counters() {
        let page = Page::<Trade>::decode(json!({
            "page": 4_294_967_296_u64,
            "pageSize": "10",
            "totalPages": 1e12,
            "totalElements": 1e12
        }));

        assert_eq!(page.page, u32::MAX);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.total_pages, u32::MAX);
        assert_eq!(page.total_elements, 1_000_000_000_000);
    }

    #[test]
    fn test_decode_drops_malformed_items() {
        let page = Page::<Trade>::decode(json!({
            "totalPages": 1,
            "trades": [{ "tradeId": "ok" }, 17, { "tradeId": ["nested"] }]
        }));

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].trade_id, "ok");
    }
}
