use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use service::CloudError;
use thiserror::Error;
use tracing::error;

use crate::pages;

/// Remote failure the request pipeline does not recover from; rendered as a failure page.
#[derive(Debug)]
pub struct PageError(pub CloudError);

impl From<CloudError> for PageError {
    fn from(e: CloudError) -> Self {
        Self(e)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "request failed");
        (StatusCode::BAD_GATEWAY, Html(pages::failure())).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
