//! Readiness endpoint

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use database::postgres::DatabaseConnection;
use serde::Serialize;

#[derive(Serialize)]
struct ReadyResponse {
    ready: bool,
    database: &'static str,
}

async fn ready(State(db): State<DatabaseConnection>) -> (StatusCode, Json<ReadyResponse>) {
    match database::postgres::check_health(&db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadyResponse {
                ready: true,
                database: "up",
            }),
        ),
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse {
                    ready: false,
                    database: "down",
                }),
            )
        }
    }
}

/// Router exposing `GET /ready`, backed by a database health check
pub fn ready_router(db: DatabaseConnection) -> Router {
    Router::new().route("/ready", get(ready)).with_state(db)
}
