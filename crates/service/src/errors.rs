use serde::Deserialize;
use thiserror::Error;

/// Failures talking to the Google APIs.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CloudError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("remote error ({status}): {message}")]
    Remote { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("access token error: {0}")]
    Token(String),
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl CloudError {
    /// Classify a non-2xx response using Google's `{"error": {code, message, status}}` body,
    /// falling back to the HTTP status when the body is not an error envelope.
    pub fn from_response(http_status: u16, body: &str) -> Self {
        let (message, status) = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(env) => (env.error.message, env.error.status),
            Err(_) => (body.trim().to_string(), String::new()),
        };
        let message = if message.is_empty() { format!("HTTP {http_status}") } else { message };
        match (status.as_str(), http_status) {
            ("PERMISSION_DENIED", _) | ("", 403) => CloudError::PermissionDenied(message),
            ("NOT_FOUND", _) | ("", 404) => CloudError::NotFound(message),
            _ => CloudError::Remote { status: http_status, message },
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, CloudError::PermissionDenied(_))
    }
}

impl From<reqwest::Error> for CloudError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            CloudError::Decode(e.to_string())
        } else {
            CloudError::Transport(e.to_string())
        }
    }
}
