use super::AppState;
use crate::domain::TerminationOutcome;
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use std::sync::Arc;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/kill/{id}", post(kill_container))
}

/// POST /api/kill/{id}
///
/// Always answers 200; failures are reported in the body.
async fn kill_container(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<TerminationOutcome> {
    Json(state.termination.kill(&id).await)
}
