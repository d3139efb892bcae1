//! HTTP health endpoint

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use super::chat_handler::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let database = match state.storage.health_check().await {
        Ok(()) => "ok",
        Err(err) => {
            tracing::warn!(error = %err, "Database health check failed");
            "unavailable"
        }
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "database": database,
    }))
}
