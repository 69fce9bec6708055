//! Availability gate
//!
//! Runs before every route (and the fallback). If the store is not
//! connected the request is answered with 503 and never reaches a handler.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::error::ApiError;
use super::server::AppState;

pub async fn availability_gate(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let connection = state.store.connection_state();
    if connection.is_ready() {
        return next.run(req).await;
    }

    tracing::debug!(
        state = %connection,
        method = %req.method(),
        path = %req.uri().path(),
        "Store not connected, rejecting request"
    );
    ApiError::Unavailable.into_response()
}
