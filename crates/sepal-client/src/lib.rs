pub mod client;
pub mod endpoints;
pub mod error;
pub mod operations;
pub mod template;
pub mod traits;

pub use client::{ClientConfig, JournalClient};
pub use error::ClientError;
pub use operations::JournalApi;
pub use template::{QueryParams, UrlTemplate};
pub use traits::ApiTransport;

pub use reqwest::Method;
