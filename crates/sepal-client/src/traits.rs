use reqwest::Method;
use serde_json::Value;

use crate::error::ClientError;

/// Raw access to the journal API.
///
/// `path` is a populated endpoint template (path and query string, relative
/// to the API root). Both calls return the `data` of a successful
/// `{success, message, data}` envelope.
#[async_trait::async_trait]
pub trait ApiTransport: Send + Sync {
    async fn get_data(&self, path: &str) -> Result<Value, ClientError>;

    async fn send_data(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError>;
}
