use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument};

use super::{decode, TokenSource};
use crate::errors::CloudError;
use crate::project_id::ProjectId;

/// Subset of the Resource Manager v3 `Project` resource.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub name: String,
    pub project_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Clone)]
pub struct ResourceManagerClient {
    http: reqwest::Client,
    endpoint: String,
    tokens: Arc<TokenSource>,
}

impl ResourceManagerClient {
    pub fn new(http: reqwest::Client, endpoint: String, tokens: Arc<TokenSource>) -> Self {
        Self { http, endpoint, tokens }
    }

    /// `GET /v3/projects/{id}`
    #[instrument(skip(self, project_id), fields(project_id = %project_id))]
    pub async fn get_project(&self, project_id: &ProjectId) -> Result<Project, CloudError> {
        let url = format!("{}/v3/{}", self.endpoint, project_id.resource_name());
        let token = self.tokens.token(&self.http).await?;
        let resp = self.http.get(&url).bearer_auth(token).send().await?;
        let project: Project = decode(resp).await?;
        debug!(returned = %project.project_id, state = ?project.state, "project lookup succeeded");
        Ok(project)
    }
}
