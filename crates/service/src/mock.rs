//! In-memory collaborators for tests and local development.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::catalog::{rows_from_records, ServiceLister, ServiceRow};
use crate::errors::CloudError;
use crate::google::{ServiceConfig, ServiceRecord};
use crate::project_id::ProjectId;
use crate::validator::{validation_outcome, ProjectValidator};

/// Answers project lookups from a fixed response and records what it was asked.
pub struct MockProjectValidator {
    response: Result<Option<String>, CloudError>,
    calls: Mutex<Vec<String>>,
}

impl MockProjectValidator {
    /// Every lookup returns the requested identifier.
    pub fn accepting() -> Self {
        Self { response: Ok(None), calls: Mutex::default() }
    }

    /// Every lookup returns `project_id`, whatever was requested.
    pub fn returning(project_id: &str) -> Self {
        Self { response: Ok(Some(project_id.to_string())), calls: Mutex::default() }
    }

    pub fn failing(err: CloudError) -> Self {
        Self { response: Err(err), calls: Mutex::default() }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProjectValidator for MockProjectValidator {
    async fn validate(&self, project_id: &ProjectId) -> Result<bool, CloudError> {
        self.calls.lock().unwrap().push(project_id.to_string());
        let lookup = match &self.response {
            Ok(None) => Ok(project_id.to_string()),
            Ok(Some(returned)) => Ok(returned.clone()),
            Err(e) => Err(e.clone()),
        };
        validation_outcome(project_id, lookup)
    }
}

/// Serves a fixed record list; `state:<STATE>` filters are applied the way the remote
/// service applies them.
pub struct MockServiceLister {
    response: Result<Vec<ServiceRecord>, CloudError>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl MockServiceLister {
    pub fn with_records(records: Vec<ServiceRecord>) -> Self {
        Self { response: Ok(records), calls: Mutex::default() }
    }

    pub fn failing(err: CloudError) -> Self {
        Self { response: Err(err), calls: Mutex::default() }
    }

    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ServiceLister for MockServiceLister {
    async fn list_services(
        &self,
        project_id: &ProjectId,
        filter: Option<&str>,
    ) -> Result<Vec<ServiceRow>, CloudError> {
        self.calls
            .lock()
            .unwrap()
            .push((project_id.to_string(), filter.map(str::to_string)));
        let records = self.response.clone()?;
        let wanted = filter.and_then(|f| f.trim().strip_prefix("state:"));
        let kept: Vec<ServiceRecord> = records
            .into_iter()
            .filter(|r| wanted.map_or(true, |s| r.state == s))
            .collect();
        Ok(rows_from_records(project_id, &kept))
    }
}

/// Build a record the way `services.list` returns it.
pub fn service_record(endpoint: &str, title: &str, state: &str) -> ServiceRecord {
    ServiceRecord {
        name: format!("projects/000000000000/services/{endpoint}"),
        config: ServiceConfig { name: endpoint.to_string(), title: title.to_string() },
        state: state.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ServiceState;

    #[tokio::test]
    async fn enabled_filter_keeps_only_enabled_in_order() {
        let lister = MockServiceLister::with_records(vec![
            service_record("a.googleapis.com", "A", "ENABLED"),
            service_record("b.googleapis.com", "B", "DISABLED"),
            service_record("c.googleapis.com", "C", "ENABLED"),
        ]);
        let project = ProjectId::parse("demo").unwrap();
        let rows = lister.list_services(&project, Some("state:ENABLED")).await.unwrap();
        let endpoints: Vec<_> = rows.iter().map(|r| r.endpoint.as_str()).collect();
        assert_eq!(endpoints, ["a.googleapis.com", "c.googleapis.com"]);
        assert!(rows.iter().all(|r| r.status == ServiceState::Enabled));
        assert_eq!(lister.calls(), vec![("demo".to_string(), Some("state:ENABLED".to_string()))]);
    }

    #[tokio::test]
    async fn returning_validator_compares_exactly() {
        let v = MockProjectValidator::returning("Proj-A");
        let project = ProjectId::parse("proj-a").unwrap();
        assert_eq!(v.validate(&project).await, Ok(false));
        assert_eq!(v.calls(), vec!["proj-a".to_string()]);
    }
}
