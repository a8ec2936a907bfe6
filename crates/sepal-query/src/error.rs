use std::sync::Arc;

use sepal_client::ClientError;
use sepal_metrics::FailureKind;
use thiserror::Error;

/// Failure of a paged fetch.
///
/// Cloneable so one failed request can be reported to every caller that
/// shared it.
#[derive(Error, Debug, Clone)]
pub enum QueryError {
    #[error(transparent)]
    Client(Arc<ClientError>),
}

impl From<ClientError> for QueryError {
    fn from(err: ClientError) -> Self {
        Self::Client(Arc::new(err))
    }
}

impl From<Arc<ClientError>> for QueryError {
    fn from(err: Arc<ClientError>) -> Self {
        Self::Client(err)
    }
}

impl QueryError {
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Client(err) => match err.as_ref() {
                ClientError::Unsuccessful { .. } => FailureKind::Rejected,
                ClientError::JsonError(_) => FailureKind::Decode,
                _ => FailureKind::Http,
            },
        }
    }
}
