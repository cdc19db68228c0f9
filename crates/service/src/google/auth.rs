use serde::Deserialize;
use tracing::debug;

use configs::GoogleConfig;

use crate::errors::CloudError;

/// Where bearer tokens for outbound calls come from.
#[derive(Clone, Debug)]
pub enum TokenSource {
    /// A fixed token, e.g. from `GOOGLE_OAUTH_ACCESS_TOKEN`.
    Static(String),
    /// The instance metadata server of the runtime environment.
    Metadata { url: String },
}

#[derive(Deserialize)]
struct MetadataToken {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

impl TokenSource {
    pub fn from_config(cfg: &GoogleConfig) -> Self {
        match &cfg.access_token {
            Some(token) => TokenSource::Static(token.clone()),
            None => TokenSource::Metadata { url: cfg.metadata_token_url.clone() },
        }
    }

    /// Fetch a token. Metadata tokens are fetched on every call; nothing is cached.
    pub async fn token(&self, http: &reqwest::Client) -> Result<String, CloudError> {
        match self {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::Metadata { url } => {
                let resp = http
                    .get(url)
                    .header("Metadata-Flavor", "Google")
                    .send()
                    .await
                    .map_err(|e| CloudError::Token(e.to_string()))?;
                if !resp.status().is_success() {
                    return Err(CloudError::Token(format!("metadata server returned {}", resp.status())));
                }
                let token: MetadataToken = resp
                    .json()
                    .await
                    .map_err(|e| CloudError::Token(e.to_string()))?;
                debug!(expires_in = token.expires_in, "fetched access token from metadata server");
                Ok(token.access_token)
            }
        }
    }
}
