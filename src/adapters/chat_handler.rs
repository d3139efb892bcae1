//! HTTP chat endpoint

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;

use crate::agents::ReActAgent;
use crate::domain::RunContext;
use crate::persistence::Storage;

/// Shared application state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<ReActAgent>,
    pub storage: Storage,
    pub started_at: Instant,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub thread_id: String,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
}

/// POST /chat
///
/// Runs one agent turn for the given thread and returns the assistant's
/// final reply. Conversation history is keyed by `thread_id` and survives
/// across requests.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<Value>)> {
    let ctx = RunContext {
        user_id: request.user_id,
        thread_id: request.thread_id,
    };

    tracing::info!(
        user_id = %ctx.user_id,
        thread_id = %ctx.thread_id,
        "Handling chat turn"
    );

    match state.agent.run(&ctx, &request.message).await {
        Ok(response) => {
            tracing::debug!(
                thread_id = %ctx.thread_id,
                iterations = response.iterations,
                tool_calls = response.tool_calls.len(),
                "Agent turn complete"
            );
            Ok(Json(ChatResponse {
                message: response.message,
            }))
        }
        Err(err) => {
            tracing::error!(thread_id = %ctx.thread_id, error = %err, "Agent turn failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            ))
        }
    }
}
