use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use server::routes::{self, projects::VALIDATION_ERROR};
use server::AppState;
use service::mock::{service_record, MockProjectValidator, MockServiceLister};
use service::CloudError;

const DOC_URL: &str =
    "https://console.cloud.google.com/apis/library/compute.googleapis.com?project=demo-1&amp;authuser=1";

fn app(validator: Arc<MockProjectValidator>, lister: Arc<MockServiceLister>) -> Router {
    routes::build_router(AppState::new(validator, lister), "/nonexistent-static-dir-for-tests")
}

fn compute_only() -> Arc<MockServiceLister> {
    Arc::new(MockServiceLister::with_records(vec![service_record(
        "compute.googleapis.com",
        "Compute Engine API",
        "ENABLED",
    )]))
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> anyhow::Result<(StatusCode, String)> {
    let resp = app.oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, String::from_utf8(bytes.to_vec())?))
}

#[tokio::test]
async fn get_root_renders_form() -> anyhow::Result<()> {
    let req = Request::builder().uri("/").body(Body::empty())?;
    let (status, body) = send(app(Arc::new(MockProjectValidator::accepting()), compute_only()), req).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<form method=\"post\" action=\"/\">"));
    assert!(!body.contains("class=\"error\""));
    Ok(())
}

#[tokio::test]
async fn valid_project_renders_single_row_table() -> anyhow::Result<()> {
    let validator = Arc::new(MockProjectValidator::accepting());
    let lister = compute_only();
    let (status, body) = send(
        app(Arc::clone(&validator), Arc::clone(&lister)),
        post_form("projectId=Demo-1&filter="),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("<tr><td>").count(), 1);
    let expected_row = format!(
        "<tr><td>Compute Engine API</td><td>compute.googleapis.com</td><td class=\"status-enabled\">ENABLED</td><td><a href=\"{DOC_URL}\""
    );
    assert!(body.contains(&expected_row), "{body}");
    assert_eq!(validator.calls(), vec!["demo-1".to_string()]);
    assert_eq!(lister.calls(), vec![("demo-1".to_string(), None)]);
    Ok(())
}

#[tokio::test]
async fn filter_is_forwarded_verbatim() -> anyhow::Result<()> {
    let validator = Arc::new(MockProjectValidator::accepting());
    let lister = Arc::new(MockServiceLister::with_records(vec![
        service_record("compute.googleapis.com", "Compute Engine API", "ENABLED"),
        service_record("bigquery.googleapis.com", "BigQuery API", "DISABLED"),
    ]));
    let (_, body) = send(
        app(validator, Arc::clone(&lister)),
        post_form("projectId=demo&filter=state%3ADISABLED"),
    )
    .await?;

    assert_eq!(lister.calls(), vec![("demo".to_string(), Some("state:DISABLED".to_string()))]);
    assert_eq!(body.matches("<tr><td>").count(), 1);
    assert!(body.contains("bigquery.googleapis.com"));
    assert!(!body.contains("compute.googleapis.com"));
    Ok(())
}

#[tokio::test]
async fn special_characters_are_rejected_before_any_remote_call() -> anyhow::Result<()> {
    let validator = Arc::new(MockProjectValidator::accepting());
    let lister = compute_only();
    let (status, body) = send(
        app(Arc::clone(&validator), Arc::clone(&lister)),
        post_form("projectId=my-project_1"),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Do not use special characters."));
    assert!(validator.calls().is_empty());
    assert!(lister.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn blank_project_id_asks_for_input() -> anyhow::Result<()> {
    let validator = Arc::new(MockProjectValidator::accepting());
    let (_, body) = send(app(Arc::clone(&validator), compute_only()), post_form("projectId=%20%20")).await?;
    assert!(body.contains("Please enter a project ID."));
    assert!(validator.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn failed_validation_shows_inline_error() -> anyhow::Result<()> {
    let lister = compute_only();
    let validator = Arc::new(MockProjectValidator::returning("someone-else"));
    let (status, body) = send(app(validator, Arc::clone(&lister)), post_form("projectId=demo")).await?;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(VALIDATION_ERROR));
    assert!(lister.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn denied_validation_shows_inline_error() -> anyhow::Result<()> {
    let validator = Arc::new(MockProjectValidator::failing(CloudError::PermissionDenied("nope".into())));
    let (_, body) = send(app(validator, compute_only()), post_form("projectId=demo")).await?;
    assert!(body.contains(VALIDATION_ERROR));
    Ok(())
}

#[tokio::test]
async fn denied_listing_shows_reason_inline() -> anyhow::Result<()> {
    let lister = Arc::new(MockServiceLister::failing(CloudError::PermissionDenied(
        "Permission denied to list services for consumer container".into(),
    )));
    let (status, body) = send(
        app(Arc::new(MockProjectValidator::accepting()), lister),
        post_form("projectId=demo"),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<p class=\"error\">Permission denied to list services for consumer container</p>"));
    assert!(!body.contains("<table>"));
    Ok(())
}

#[tokio::test]
async fn unexpected_remote_failure_renders_failure_page() -> anyhow::Result<()> {
    let validator = Arc::new(MockProjectValidator::failing(CloudError::Transport("connection reset".into())));
    let (status, body) = send(app(validator, compute_only()), post_form("projectId=demo")).await?;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Something went wrong"));
    assert!(!body.contains("connection reset"));

    let lister = Arc::new(MockServiceLister::failing(CloudError::Remote { status: 429, message: "quota".into() }));
    let (status, _) = send(
        app(Arc::new(MockProjectValidator::accepting()), lister),
        post_form("projectId=demo"),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> anyhow::Result<()> {
    let req = Request::builder().uri("/health").body(Body::empty())?;
    let (status, body) = send(app(Arc::new(MockProjectValidator::accepting()), compute_only()), req).await?;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body)?;
    assert_eq!(json["status"], "ok");
    Ok(())
}
