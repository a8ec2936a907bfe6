use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use sepal_client::ApiTransport;
use sepal_metrics::QueryMetrics;
use sepal_types::Page;

use crate::{
    cache::RequestCache,
    error::QueryError,
    query::{PagedQuery, build_query_params},
    window::{PageWindow, compute_page_window},
};

/// Lifecycle of one paged table
#[derive(Debug, Clone)]
pub enum QueryState<T> {
    /// Nothing requested yet, or the query is disabled
    Idle,
    /// A request is in flight; the last page shown stays available
    Fetching { previous: Option<Arc<Page<T>>> },
    Ready { page: Arc<Page<T>> },
    Errored { error: QueryError },
}

impl<T> QueryState<T> {
    pub const fn is_fetching(&self) -> bool {
        matches!(self, Self::Fetching { .. })
    }

    /// The page a table should render: the current one, or the previous
    /// one while the next loads
    pub const fn page(&self) -> Option<&Arc<Page<T>>> {
        match self {
            Self::Ready { page } => Some(page),
            Self::Fetching { previous } => previous.as_ref(),
            Self::Idle | Self::Errored { .. } => None,
        }
    }

    pub const fn error(&self) -> Option<&QueryError> {
        match self {
            Self::Errored { error } => Some(error),
            _ => None,
        }
    }
}

struct Request<Q> {
    filters: Q,
    page: u32,
    page_size: u32,
    /// From the latest applied response, bounds `set_page`
    total_pages: Option<u32>,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

struct Inner<Q: PagedQuery> {
    transport: Arc<dyn ApiTransport>,
    cache: RequestCache,
    metrics: Option<Arc<QueryMetrics>>,
    request: Mutex<Request<Q>>,
    state: watch::Sender<QueryState<Q::Item>>,
}

impl<Q: PagedQuery> Inner<Q> {
    fn request(&self) -> MutexGuard<'_, Request<Q>> {
        self.request.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(self: &Arc<Self>, generation: u64, result: Result<Value, QueryError>) {
        let mut request = self.request();
        if request.generation != generation {
            tracing::debug!(
                entity = Q::ENTITY,
                generation,
                current = request.generation,
                "Discarding stale response"
            );
            if let Some(metrics) = &self.metrics {
                metrics.record_response_discarded(Q::ENTITY);
            }
            return;
        }
        request.in_flight = None;

        match result {
            Ok(data) => {
                let page = Page::<Q::Item>::decode(data);
                request.total_pages = Some(page.total_pages);

                if page.total_pages > 0 && request.page > page.last_page() {
                    tracing::debug!(
                        entity = Q::ENTITY,
                        requested = request.page,
                        last = page.last_page(),
                        "Requested page past the end, fetching the last page"
                    );
                    if let Some(metrics) = &self.metrics {
                        metrics.record_response_discarded(Q::ENTITY);
                    }
                    request.page = page.last_page();
                    self.start(&mut request, false);
                    return;
                }
                if page.total_pages == 0 {
                    request.page = 0;
                }

                tracing::debug!(
                    entity = Q::ENTITY,
                    page = page.page,
                    total_pages = page.total_pages,
                    items = page.items.len(),
                    "Page ready"
                );
                if let Some(metrics) = &self.metrics {
                    metrics.record_fetch_succeeded(Q::ENTITY);
                }
                self.state.send_replace(QueryState::Ready {
                    page: Arc::new(page),
                });
            }
            Err(error) => {
                tracing::warn!(entity = Q::ENTITY, error = %error, "Paged fetch failed");
                if let Some(metrics) = &self.metrics {
                    metrics.record_fetch_failed(Q::ENTITY, error.failure_kind());
                }
                self.state.send_replace(QueryState::Errored { error });
            }
        }
    }

    /// Supersedes whatever is in flight and fetches the tuple in `request`
    fn start(self: &Arc<Self>, request: &mut Request<Q>, bypass_cache: bool) {
        if let Some(token) = request.in_flight.take() {
            token.cancel();
        }
        request.generation += 1;
        let generation = request.generation;

        if !request.filters.is_enabled() {
            tracing::debug!(entity = Q::ENTITY, "Query disabled, staying idle");
            self.state.send_replace(QueryState::Idle);
            return;
        }

        let params = build_query_params(&request.filters, request.page, request.page_size);
        let path = Q::TEMPLATE.populate(&params);
        let token = CancellationToken::new();
        request.in_flight = Some(token.clone());

        tracing::debug!(
            entity = Q::ENTITY,
            generation,
            page = request.page,
            page_size = request.page_size,
            "Dispatching paged fetch"
        );
        if let Some(metrics) = &self.metrics {
            metrics.record_fetch_started(Q::ENTITY, request.page);
        }

        self.state.send_modify(|state| {
            let previous = state.page().cloned();
            *state = QueryState::Fetching { previous };
        });

        let inner = Arc::clone(self);
        tokio::spawn(async move {
            let fetch = async {
                if bypass_cache {
                    inner.cache.invalidate(&path).await;
                }
                inner.cache.fetch(inner.transport.as_ref(), &path).await
            };

            tokio::select! {
                () = token.cancelled() => {
                    tracing::debug!(entity = Q::ENTITY, generation, "Fetch cancelled");
                    if let Some(metrics) = &inner.metrics {
                        metrics.record_response_discarded(Q::ENTITY);
                    }
                }
                result = fetch => inner.apply(generation, result),
            }
        });
    }
}

/// Owns the page/filter state of one table and keeps its data in sync.
///
/// Every change of page, page size or filters dispatches a new fetch and
/// cancels the one in flight. Responses are tagged with the generation that
/// issued them and only the newest generation may update the state.
///
/// Mutating methods spawn onto the current Tokio runtime and must be called
/// from within one.
pub struct PagedQueryController<Q: PagedQuery> {
    inner: Arc<Inner<Q>>,
}

impl<Q: PagedQuery> Clone for PagedQueryController<Q> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<Q: PagedQuery> PagedQueryController<Q> {
    pub fn new(transport: Arc<dyn ApiTransport>, filters: Q, page_size: u32) -> Self {
        Self::with_cache(transport, RequestCache::default(), filters, page_size)
    }

    /// Builds a controller sharing `cache` with other controllers
    pub fn with_cache(
        transport: Arc<dyn ApiTransport>,
        cache: RequestCache,
        filters: Q,
        page_size: u32,
    ) -> Self {
        let (state, _) = watch::channel(QueryState::Idle);

        Self {
            inner: Arc::new(Inner {
                transport,
                cache,
                metrics: None,
                request: Mutex::new(Request {
                    filters,
                    page: 0,
                    page_size: page_size.max(1),
                    total_pages: None,
                    generation: 0,
                    in_flight: None,
                }),
                state,
            }),
        }
    }

    /// Must be called before the controller is cloned or used
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<QueryMetrics>) -> Self {
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            inner.metrics = Some(metrics);
        } else {
            tracing::warn!(entity = Q::ENTITY, "Controller already shared, metrics not attached");
        }
        self
    }

    /// Issues the first fetch for the current tuple
    pub fn load(&self) {
        self.dispatch(|_| {}, false);
    }

    /// Moves to page `page`, clamped to the last page the server reported.
    /// Before the page count is known, a page past the end is replaced by
    /// the last page once the response arrives.
    pub fn set_page(&self, page: u32) {
        self.dispatch(
            |request| {
                request.page = match request.total_pages {
                    Some(total) => page.min(total.saturating_sub(1)),
                    None => page,
                };
            },
            false,
        );
    }

    /// Replaces the filters and goes back to the first page
    pub fn set_filters(&self, filters: Q) {
        self.dispatch(
            |request| {
                request.filters = filters;
                request.page = 0;
                request.total_pages = None;
            },
            false,
        );
    }

    pub fn set_page_size(&self, page_size: u32) {
        self.dispatch(
            |request| {
                request.page_size = page_size.max(1);
                request.page = 0;
                request.total_pages = None;
            },
            false,
        );
    }

    /// Re-issues the current tuple, bypassing any shared response
    pub fn refresh(&self) {
        self.dispatch(|_| {}, true);
    }

    pub fn state(&self) -> QueryState<Q::Item> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState<Q::Item>> {
        self.inner.state.subscribe()
    }

    /// Waits until no fetch is in flight and returns that state
    pub async fn settled(&self) -> QueryState<Q::Item> {
        let mut receiver = self.inner.state.subscribe();
        match receiver.wait_for(|state| !state.is_fetching()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.inner.request().page
    }

    pub fn page_size(&self) -> u32 {
        self.inner.request().page_size
    }

    pub fn filters(&self) -> Q {
        self.inner.request().filters.clone()
    }

    /// Pagination controls for the latest known page count
    pub fn page_window(&self) -> Option<PageWindow> {
        let request = self.inner.request();
        compute_page_window(request.page, request.total_pages?)
    }

    fn dispatch(&self, update: impl FnOnce(&mut Request<Q>), bypass_cache: bool) {
        let mut request = self.inner.request();
        update(&mut request);
        self.inner.start(&mut request, bypass_cache);
    }
}
