use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Internal client error")]
    InternalError,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Request to {path} failed with status {status}")]
    Status { path: String, status: u16 },

    #[error("API call to {path} returned with error: {message}")]
    Unsuccessful { path: String, message: String },
}

impl ClientError {
    /// Whether the API itself answered and refused the call
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Unsuccessful { .. })
    }
}
