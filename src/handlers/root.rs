use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /
pub async fn welcome() -> Json<Value> {
    Json(json!({ "msg": "Welcome to the Gherkin Tracker API" }))
}

/// GET /health - 503 when the store does not answer
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let backend = state.store.backend();
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": Utc::now().to_rfc3339(),
                "database": backend,
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed against {}: {}", backend, e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "timestamp": Utc::now().to_rfc3339(),
                    "database": backend,
                })),
            )
        }
    }
}

/// Fallback for unmatched `/api` paths
pub async fn api_not_found() -> ApiError {
    ApiError::not_found("Not found")
}
