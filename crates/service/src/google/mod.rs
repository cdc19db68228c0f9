//! Thin REST clients for the two Google APIs the app reads from.
//!
//! Both clients share one `reqwest::Client` (connection pool, request timeout) and one
//! [`TokenSource`] for bearer credentials.

pub mod auth;
pub mod resource_manager;
pub mod service_usage;

use std::sync::Arc;
use std::time::Duration;

use configs::GoogleConfig;
use serde::de::DeserializeOwned;

use crate::errors::CloudError;

pub use auth::TokenSource;
pub use resource_manager::{Project, ResourceManagerClient};
pub use service_usage::{ServiceConfig, ServiceRecord, ServiceUsageClient};

/// Build the shared HTTP client with the configured request timeout.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, CloudError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("api-status/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| CloudError::Transport(e.to_string()))
}

/// Both clients wired from configuration.
pub fn clients_from_config(
    cfg: &GoogleConfig,
) -> Result<(ResourceManagerClient, ServiceUsageClient), CloudError> {
    let http = build_http_client(Duration::from_secs(cfg.request_timeout_secs))?;
    let tokens = Arc::new(TokenSource::from_config(cfg));
    let projects = ResourceManagerClient::new(
        http.clone(),
        cfg.resource_manager_endpoint.clone(),
        Arc::clone(&tokens),
    );
    let services = ServiceUsageClient::new(http, cfg.service_usage_endpoint.clone(), tokens, cfg.page_size);
    Ok((projects, services))
}

/// Decode a 2xx JSON body, or classify the error envelope.
pub(crate) async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, CloudError> {
    let status = resp.status();
    if status.is_success() {
        let bytes = resp.bytes().await?;
        serde_json::from_slice::<T>(&bytes).map_err(|e| CloudError::Decode(e.to_string()))
    } else {
        let body = resp.text().await.unwrap_or_default();
        Err(CloudError::from_response(status.as_u16(), &body))
    }
}
