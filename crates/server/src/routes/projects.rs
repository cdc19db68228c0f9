use axum::{extract::State, response::Html, Form};
use serde::Deserialize;
use tracing::{debug, error, info};

use service::catalog::filter_option;
use service::{CloudError, ProjectId};

use crate::errors::PageError;
use crate::pages;
use crate::state::AppState;

pub const VALIDATION_ERROR: &str =
    "Unable to validate project ID. Please check the spelling or your permissions.";

#[derive(Debug, Deserialize)]
pub struct ProjectForm {
    #[serde(rename = "projectId", default)]
    pub project_id: String,
    #[serde(default)]
    pub filter: String,
}

/// `GET /`: empty input form.
pub async fn input_page() -> Html<String> {
    Html(pages::index(None))
}

/// `POST /`: normalize, sanitize, validate, list, render.
pub async fn submit_project(
    State(state): State<AppState>,
    Form(form): Form<ProjectForm>,
) -> Result<Html<String>, PageError> {
    debug!(raw_project_id = %form.project_id, filter = %form.filter, "project form submitted");
    let project_id = match ProjectId::parse(&form.project_id) {
        Ok(id) => {
            info!("No special characters found.");
            id
        }
        Err(e) => {
            info!(reason = %e, "project id rejected");
            return Ok(Html(pages::index(Some(&e.to_string()))));
        }
    };

    if !state.validator.validate(&project_id).await? {
        return Ok(Html(pages::index(Some(VALIDATION_ERROR))));
    }

    let filter = filter_option(&form.filter);
    let rows = match state.lister.list_services(&project_id, filter).await {
        Ok(rows) => rows,
        Err(CloudError::PermissionDenied(reason)) => {
            error!(%project_id, %reason, "permission denied while listing services");
            return Ok(Html(pages::index(Some(&reason))));
        }
        Err(e) => return Err(e.into()),
    };

    info!(%project_id, rows = rows.len(), "rendering service table");
    Ok(Html(pages::service_table(&project_id, filter, &rows)))
}
