use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{decode, TokenSource};
use crate::errors::CloudError;
use crate::project_id::ProjectId;

/// One entry of Service Usage v1 `services.list`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ServiceRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub config: ServiceConfig,
    /// `ENABLED`, `DISABLED` or `STATE_UNSPECIFIED`.
    #[serde(default)]
    pub state: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Endpoint name, e.g. `compute.googleapis.com`.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListServicesPage {
    #[serde(default)]
    services: Vec<ServiceRecord>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Clone)]
pub struct ServiceUsageClient {
    http: reqwest::Client,
    endpoint: String,
    tokens: Arc<TokenSource>,
    page_size: u32,
}

impl ServiceUsageClient {
    pub fn new(http: reqwest::Client, endpoint: String, tokens: Arc<TokenSource>, page_size: u32) -> Self {
        Self { http, endpoint, tokens, page_size }
    }

    /// `GET /v1/projects/{id}/services`, following `nextPageToken` to the end. A token that
    /// was already requested ends the listing.
    /// Records are returned in the order the API produced them.
    #[instrument(skip(self, project_id), fields(project_id = %project_id))]
    pub async fn list_services(
        &self,
        project_id: &ProjectId,
        filter: Option<&str>,
    ) -> Result<Vec<ServiceRecord>, CloudError> {
        let url = format!("{}/v1/{}/services", self.endpoint, project_id.resource_name());
        let token = self.tokens.token(&self.http).await?;
        let page_size = self.page_size.to_string();

        let mut records = Vec::new();
        let mut page_token: Option<String> = None;
        let mut seen_tokens: HashSet<String> = HashSet::new();
        let mut pages = 0u32;
        loop {
            let mut query: Vec<(&str, &str)> = vec![("pageSize", page_size.as_str())];
            if let Some(f) = filter {
                query.push(("filter", f));
            }
            if let Some(t) = page_token.as_deref() {
                query.push(("pageToken", t));
            }
            let resp = self.http.get(&url).bearer_auth(&token).query(&query).send().await?;
            let page: ListServicesPage = decode(resp).await?;
            pages += 1;
            records.extend(page.services);

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) if seen_tokens.contains(&next) => {
                    warn!(page_token = %next, pages, "service list returned a page token it already served; stopping");
                    break;
                }
                Some(next) => {
                    seen_tokens.insert(next.clone());
                    page_token = Some(next);
                }
                None => break,
            }
        }
        debug!(pages, count = records.len(), "listed services");
        Ok(records)
    }
}
