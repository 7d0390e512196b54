use super::{ApiResult, AppState};
use crate::domain::ViewRecord;
use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

#[derive(Debug, Serialize, Deserialize)]
pub struct ContainersResponse {
    pub containers: Vec<ViewRecord>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/containers", get(list_containers))
}

/// GET /api/containers
async fn list_containers(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ContainersResponse>> {
    let containers = state.discovery.discover_default().await.map_err(|e| {
        error!(error = %e, "container discovery failed");
        e
    })?;

    Ok(Json(ContainersResponse { containers }))
}
