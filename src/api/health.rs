use super::AppState;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

/// Liveness of the service itself; does not touch the container runtime.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
