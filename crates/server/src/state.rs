use std::sync::Arc;

use configs::GoogleConfig;
use service::catalog::ServiceUsageLister;
use service::google::clients_from_config;
use service::validator::ResourceManagerValidator;
use service::{ProjectValidator, ServiceLister};

use crate::errors::StartupError;

/// Application object shared by all requests: the two remote collaborators.
#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<dyn ProjectValidator>,
    pub lister: Arc<dyn ServiceLister>,
}

impl AppState {
    pub fn new(validator: Arc<dyn ProjectValidator>, lister: Arc<dyn ServiceLister>) -> Self {
        Self { validator, lister }
    }

    /// Wire the Google-backed collaborators.
    pub fn from_config(cfg: &GoogleConfig) -> Result<Self, StartupError> {
        let (projects, services) =
            clients_from_config(cfg).map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
        Ok(Self::new(
            Arc::new(ResourceManagerValidator::new(projects)),
            Arc::new(ServiceUsageLister::new(services)),
        ))
    }
}
