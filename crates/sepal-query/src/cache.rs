use std::time::Duration;

use moka::future::Cache;
use serde_json::Value;

use sepal_client::ApiTransport;

use crate::error::QueryError;

pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

/// Shares responses between identical requests.
///
/// Keyed by the populated endpoint path, which already encodes the entity
/// and every query parameter. Concurrent requests for the same key wait on
/// a single in-flight call; failures are handed to every waiter but never
/// stored.
#[derive(Clone)]
pub struct RequestCache {
    inner: Cache<String, Value>,
}

impl RequestCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Cache::builder().time_to_live(ttl).build(),
        }
    }

    pub async fn fetch(&self, transport: &dyn ApiTransport, path: &str) -> Result<Value, QueryError> {
        let owned = path.to_string();
        self.inner
            .try_get_with(owned, async {
                tracing::debug!(path, "Fetching from journal API");
                transport.get_data(path).await
            })
            .await
            .map_err(QueryError::from)
    }

    pub async fn invalidate(&self, path: &str) {
        self.inner.invalidate(path).await;
    }
}

impl Default for RequestCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use sepal_client::{ClientError, Method};
    use serde_json::json;

    use super::*;

    struct CountingTransport {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl ApiTransport for CountingTransport {
        async fn get_data(&self, _path: &str) -> Result<Value, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.fail {
                Err(ClientError::Status {
                    path: "/x".to_string(),
                    status: 503,
                })
            } else {
                Ok(json!({ "ok": true }))
            }
        }

        async fn send_data(
            &self,
            _method: Method,
            _path: &str,
            _body: Option<Value>,
        ) -> Result<Value, ClientError> {
            unreachable!("read-only cache")
        }
    }

    #[tokio::test]
    async fn test_concurrent_identical_requests_share_one_call() {
        let transport = Arc::new(CountingTransport {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let cache = RequestCache::default();

        let (a, b) = tokio::join!(
            cache.fetch(transport.as_ref(), "/trade/x?page=0"),
            cache.fetch(transport.as_ref(), "/trade/x?page=0"),
        );

        assert_eq!(a.unwrap(), json!({ "ok": true }));
        assert_eq!(b.unwrap(), json!({ "ok": true }));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_distinct_keys_are_fetched_separately() {
        let transport = CountingTransport {
            calls: AtomicUsize::new(0),
            fail: false,
        };
        let cache = RequestCache::default();

        cache.fetch(&transport, "/trade/x?page=0").await.unwrap();
        cache.fetch(&transport, "/trade/x?page=1").await.unwrap();
        cache.fetch(&transport, "/trade/x?page=0").await.unwrap();

        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let transport = CountingTransport {
            calls: AtomicUsize::new(0),
            fail: true,
        };
        let cache = RequestCache::default();

        assert!(cache.fetch(&transport, "/job/x").await.is_err());
        assert!(cache.fetch(&transport, "/job/x").await.is_err());

        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_a_new_call() {
        let transport = CountingTransport {
            calls: AtomicUsize::new(0),
            fail: false,
        };
        let cache = RequestCache::default();

        cache.fetch(&transport, "/job/x").await.unwrap();
        cache.invalidate("/job/x").await;
        cache.fetch(&transport, "/job/x").await.unwrap();

        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }
}
