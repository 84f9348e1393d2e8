use axum::{extract::State, routing::get, Json, Router};
use core_config::AppInfo;
use serde::Serialize;

/// Liveness response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// Router exposing `GET /health` for liveness probes.
///
/// Readiness (`/ready`) is app-specific: the app wires its own handler that
/// checks its backing services.
pub fn health_router(app: AppInfo) -> Router {
    Router::new().route("/health", get(health)).with_state(app)
}

async fn health(State(app): State<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        name: app.name,
        version: app.version,
    })
}
