//! Liveness endpoint

use axum::{routing::get, Router};

/// Plain-text greeting returned by `GET /`
pub const GREETING: &str = "Hello Technigo!";

/// GET /
async fn root() -> &'static str {
    GREETING
}

/// Root routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(root))
}
