//! Axum server setup
//!
//! Server skeleton with:
//! - Availability gate over every route and the fallback
//! - Permissive CORS
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::{gate, routes};
use crate::db::LibraryStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LibraryStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }
}

/// Build the application router with all routes.
pub fn build_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .merge(routes::root::router())
        .merge(routes::authors::router())
        .merge(routes::books::router())
        .fallback(routes::not_found)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            gate::availability_gate,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server until `shutdown` resolves.
///
/// # Example
///
/// ```ignore
/// let state = AppState::new(Arc::new(MemoryStore::new()));
/// run_server(state, "127.0.0.1:8080".parse()?, shutdown_signal()).await?;
/// ```
pub async fn run_server<F>(
    state: AppState,
    bind_addr: SocketAddr,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid database URL: {0}")]
    Database(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn root_is_plain_text() {
        let app = build_router(AppState::new(Arc::new(MemoryStore::new())));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));
    }

    #[tokio::test]
    async fn serves_and_shuts_down() {
        let state = AppState::new(Arc::new(MemoryStore::new()));
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let server = tokio::spawn(run_server(
            state,
            SocketAddr::from(([127, 0, 0, 1], 0)),
            async move {
                let _ = rx.await;
            },
        ));

        tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }
}
