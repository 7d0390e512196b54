//! HTTP boundary consumed by the presentation layer.

mod containers;
mod error;
mod health;
mod kill;
mod page;

pub use error::{ApiError, ApiResult, ErrorResponse};

use crate::services::{DiscoveryService, TerminationService};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared, read-only handles for the request handlers.
pub struct AppState {
    pub discovery: Arc<DiscoveryService>,
    pub termination: Arc<TerminationService>,
}

impl AppState {
    pub fn new(discovery: Arc<DiscoveryService>, termination: Arc<TerminationService>) -> Self {
        Self {
            discovery,
            termination,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(page::router())
        .merge(health::router())
        .merge(containers::router())
        .merge(kill::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
