use super::AppState;
use axum::{Router, response::Html, routing::get};
use std::sync::Arc;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}

/// The page fetches `/api/containers` itself and renders client-side.
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
