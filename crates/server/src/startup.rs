use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// Resolve the listen address from `[server]` (`PORT` already applied).
fn load_bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    cfg.server
        .bind_addr()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Build the router with Google-backed collaborators.
pub fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let state = AppState::from_config(&cfg.google)?;
    Ok(routes::build_router(state, &cfg.frontend.static_dir))
}

/// Public entry: build the app and serve until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    common::env::ensure_env(&cfg.frontend.static_dir).await?;

    let app = build_app(&cfg)?;
    let addr = load_bind_addr(&cfg)?;
    info!(
        %addr,
        token_source = if cfg.google.access_token.is_some() { "static" } else { "metadata" },
        "starting api status server"
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| StartupError::Runtime(format!("cannot bind {addr}: {e}")))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    info!("server stopped accepting connections");
    Ok(())
}
