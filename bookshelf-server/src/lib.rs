//! bookshelf-server: read-only HTTP API over authors and books
//!
//! Requests pass an availability gate, then hit handlers that read through
//! the [`db::LibraryStore`] trait. A fixture seeder can reset both
//! collections at startup.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod seed;

use std::sync::Arc;

pub use config::ServerConfig;
pub use db::{LibraryStore, MemoryStore, PgStore};
pub use http::{build_router, AppState, ServerError};

/// Start the HTTP server against PostgreSQL and block until shutdown.
///
/// The pool connects lazily, so this succeeds even while the database is
/// down; requests get 503 until the readiness monitor reports a connection.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let pool = db::create_pool(&config.database_url)?;
    let store = PgStore::new(pool);
    let monitor = store.spawn_monitor(config.health_check_interval);

    if config.reset_database {
        seed::spawn(Arc::new(store.clone()), store.readiness().clone());
    }

    let state = AppState::new(Arc::new(store.clone()));
    let result = http::run_server(state, config.bind_addr, http::server::shutdown_signal()).await;

    store.close().await;
    monitor.abort();

    result
}
