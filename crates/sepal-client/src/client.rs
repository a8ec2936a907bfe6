use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;

use sepal_types::ApiResponse;

use crate::{error::ClientError, traits::ApiTransport};

/// Header carrying the API token on every request
pub const AUTH_HEADER: &str = "fp-api_token";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host, e.g. `https://journal.example.com`
    pub api_domain: String,
    /// Version prefix appended to the domain, e.g. `/api/v1`
    pub api_version: String,
    pub api_token: Option<String>,
    /// `None` waits for the server indefinitely
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn base_url(&self) -> String {
        format!(
            "{}{}",
            self.api_domain.trim_end_matches('/'),
            self.api_version.trim_end_matches('/')
        )
    }
}

pub struct JournalClient {
    http_client: Client,
    base_url: String,
}

impl JournalClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http_client = http_client(config)?;

        Ok(Self {
            http_client,
            base_url: config.base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute(&self, request: RequestBuilder, path: &str) -> Result<Value, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(path, status = status.as_u16(), "Journal API returned an error status");
            return Err(ClientError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        // `data` may be absent on failures, decode it as optional first
        let envelope = response.json::<ApiResponse<Option<Value>>>().await?;
        envelope
            .into_result()
            .map(Option::unwrap_or_default)
            .map_err(|message| {
                tracing::warn!(path, error = %message, "Journal API call was unsuccessful");
                ClientError::Unsuccessful {
                    path: path.to_string(),
                    message,
                }
            })
    }
}

#[async_trait::async_trait]
impl ApiTransport for JournalClient {
    async fn get_data(&self, path: &str) -> Result<Value, ClientError> {
        tracing::debug!(path, "GET");
        let request = self.http_client.get(self.url(path));
        self.execute(request, path).await
    }

    async fn send_data(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        tracing::debug!(path, %method, "Sending");
        let mut request = self.http_client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(&body);
        }
        self.execute(request, path).await
    }
}

pub fn http_client(config: &ClientConfig) -> Result<Client, ClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(token) = &config.api_token {
        let mut value = HeaderValue::from_str(token)?;
        value.set_sensitive(true);
        headers.insert(HeaderName::from_static(AUTH_HEADER), value);
    }

    let mut builder = Client::builder().default_headers(headers);
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(|e| {
        tracing::error!("Failed to build HTTP client: {}", e);
        ClientError::InternalError
    })
}
