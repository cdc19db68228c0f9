//! Service layer for the API status viewer.
//! - Project identifier normalization and sanitizing (`project_id`).
//! - Collaborator traits used by the web handler (`validator`, `catalog`).
//! - Google REST clients backing those traits (`google`).
//! - In-memory collaborators for tests (`mock`).

pub mod errors;
pub mod project_id;
pub mod validator;
pub mod catalog;
pub mod google;
pub mod mock;

pub use catalog::{ServiceLister, ServiceRow, ServiceState};
pub use errors::CloudError;
pub use project_id::{InputError, ProjectId};
pub use validator::ProjectValidator;
