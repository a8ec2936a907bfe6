use std::sync::Arc;

use opentelemetry::{KeyValue, global, metrics::Counter};

#[derive(Debug)]
pub struct MetricsRegistry {
    pub queries: Arc<QueryMetrics>,
}

impl MetricsRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            queries: QueryMetrics::new(),
        })
    }
}

/// Counters for paged table fetches, labelled by entity (`trades`, `jobs`...)
#[derive(Debug)]
pub struct QueryMetrics {
    fetches_started: Counter<u64>,
    fetches_succeeded: Counter<u64>,
    fetches_failed: Counter<u64>,
    responses_discarded: Counter<u64>,
}

impl QueryMetrics {
    pub fn new() -> Arc<Self> {
        let meter = global::meter("sepal");
        let fetches_started = meter
            .u64_counter("paged_fetches_started_total")
            .with_description("Number of paged fetches dispatched")
            .with_unit("count")
            .init();

        let fetches_succeeded = meter
            .u64_counter("paged_fetches_succeeded_total")
            .with_description("Number of paged fetches applied to controller state")
            .with_unit("count")
            .init();

        let fetches_failed = meter
            .u64_counter("paged_fetches_failed_total")
            .with_description("Number of paged fetches that ended in an error state")
            .with_unit("count")
            .init();

        let responses_discarded = meter
            .u64_counter("paged_responses_discarded_total")
            .with_description("Number of responses dropped because a newer fetch superseded them")
            .with_unit("count")
            .init();

        Arc::new(Self {
            fetches_started,
            fetches_succeeded,
            fetches_failed,
            responses_discarded,
        })
    }

    pub fn record_fetch_started(&self, entity: &str, page: u32) {
        self.fetches_started.add(
            1,
            &[
                KeyValue::new("entity", entity.to_string()),
                KeyValue::new("page", i64::from(page)),
            ],
        );
    }

    pub fn record_fetch_succeeded(&self, entity: &str) {
        self.fetches_succeeded
            .add(1, &[KeyValue::new("entity", entity.to_string())]);
    }

    pub fn record_fetch_failed(&self, entity: &str, kind: FailureKind) {
        self.fetches_failed.add(
            1,
            &[
                KeyValue::new("entity", entity.to_string()),
                KeyValue::new("kind", kind.as_str()),
            ],
        );
    }

    pub fn record_response_discarded(&self, entity: &str) {
        self.responses_discarded
            .add(1, &[KeyValue::new("entity", entity.to_string())]);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport or non-2xx status
    Http,
    /// The API answered with `success: false`
    Rejected,
    Decode,
}

impl FailureKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Rejected => "rejected",
            Self::Decode => "decode",
        }
    }
}
