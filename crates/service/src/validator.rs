use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::errors::CloudError;
use crate::google::ResourceManagerClient;
use crate::project_id::ProjectId;

/// Confirms a project exists and the caller may read it.
///
/// `Ok(false)` covers the outcomes the user can fix (denied, unknown or mismatching
/// project); any other failure is returned as an error.
#[async_trait]
pub trait ProjectValidator: Send + Sync {
    async fn validate(&self, project_id: &ProjectId) -> Result<bool, CloudError>;
}

/// Exact, case-sensitive comparison of the requested and returned identifiers.
pub fn is_same_project(requested: &str, returned: &str) -> bool {
    requested == returned
}

/// Map a project lookup outcome onto the validation result.
pub fn validation_outcome(
    project_id: &ProjectId,
    lookup: Result<String, CloudError>,
) -> Result<bool, CloudError> {
    match lookup {
        Ok(returned) if is_same_project(project_id.as_str(), &returned) => {
            info!(%project_id, "project validated");
            Ok(true)
        }
        Ok(returned) => {
            warn!(%project_id, %returned, "project lookup returned a different identifier");
            Ok(false)
        }
        Err(CloudError::PermissionDenied(reason)) => {
            error!(%project_id, %reason, "permission denied while validating project");
            Ok(false)
        }
        Err(CloudError::NotFound(reason)) => {
            warn!(%project_id, %reason, "project not found");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Validator backed by Resource Manager v3 `projects.get`.
pub struct ResourceManagerValidator {
    client: ResourceManagerClient,
}

impl ResourceManagerValidator {
    pub fn new(client: ResourceManagerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProjectValidator for ResourceManagerValidator {
    async fn validate(&self, project_id: &ProjectId) -> Result<bool, CloudError> {
        let lookup = self.client.get_project(project_id).await.map(|p| p.project_id);
        validation_outcome(project_id, lookup)
    }
}
