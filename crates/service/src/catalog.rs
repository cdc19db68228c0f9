use std::fmt;

use async_trait::async_trait;
use tracing::info;

use crate::errors::CloudError;
use crate::google::{ServiceRecord, ServiceUsageClient};
use crate::project_id::ProjectId;

pub const TABLE_COLUMNS: [&str; 4] = ["Title", "API Endpoint", "Status", "Documentation"];

/// Display status of one service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceState {
    Enabled,
    Disabled,
    Other,
}

impl ServiceState {
    pub fn from_remote(state: &str) -> Self {
        match state {
            "ENABLED" => ServiceState::Enabled,
            "DISABLED" => ServiceState::Disabled,
            _ => ServiceState::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceState::Enabled => "ENABLED",
            ServiceState::Disabled => "DISABLED",
            ServiceState::Other => "OTHER",
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the results table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceRow {
    pub title: String,
    pub endpoint: String,
    pub status: ServiceState,
    pub documentation_url: String,
}

impl ServiceRow {
    pub fn from_record(project_id: &ProjectId, record: &ServiceRecord) -> Self {
        Self {
            title: record.config.title.clone(),
            endpoint: record.config.name.clone(),
            status: ServiceState::from_remote(&record.state),
            documentation_url: documentation_url(project_id.as_str(), &record.config.name),
        }
    }

    /// Cells in `TABLE_COLUMNS` order.
    pub fn cells(&self) -> [&str; 4] {
        [self.title.as_str(), self.endpoint.as_str(), self.status.as_str(), self.documentation_url.as_str()]
    }
}

pub fn documentation_url(project_id: &str, endpoint: &str) -> String {
    format!("https://console.cloud.google.com/apis/library/{endpoint}?project={project_id}&authuser=1")
}

/// One row per record, in the order given.
pub fn rows_from_records(project_id: &ProjectId, records: &[ServiceRecord]) -> Vec<ServiceRow> {
    records.iter().map(|r| ServiceRow::from_record(project_id, r)).collect()
}

/// Form filter value to pass on; blank means no filter, anything else goes through verbatim.
pub fn filter_option(raw: &str) -> Option<&str> {
    if raw.trim().is_empty() { None } else { Some(raw) }
}

/// Lists the services of a project as display rows.
#[async_trait]
pub trait ServiceLister: Send + Sync {
    async fn list_services(
        &self,
        project_id: &ProjectId,
        filter: Option<&str>,
    ) -> Result<Vec<ServiceRow>, CloudError>;
}

/// Lister backed by Service Usage v1 `services.list`.
pub struct ServiceUsageLister {
    client: ServiceUsageClient,
}

impl ServiceUsageLister {
    pub fn new(client: ServiceUsageClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ServiceLister for ServiceUsageLister {
    async fn list_services(
        &self,
        project_id: &ProjectId,
        filter: Option<&str>,
    ) -> Result<Vec<ServiceRow>, CloudError> {
        let records = self.client.list_services(project_id, filter).await?;
        let rows = rows_from_records(project_id, &records);
        info!(%project_id, filter = filter.unwrap_or(""), rows = rows.len(), "services listed");
        Ok(rows)
    }
}
