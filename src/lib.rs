//! Conversational support-ticket assistant
//!
//! An LLM-driven agent exposed over HTTP that manages support tickets
//! through natural language. The agent runs a reason/act loop against a
//! set of ticket CRUD tools and long-term user memories, with
//! conversation state persisted per thread so dialogues survive across
//! requests and restarts.

pub mod adapters;
pub mod agents;
pub mod cli;
pub mod config;
pub mod domain;
pub mod persistence;
pub mod tickets;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use adapters::AppState;

/// Build the HTTP router with all routes and middleware attached
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(adapters::health))
        .route("/chat", post(adapters::chat))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
