//! HTTP server layer
//!
//! Axum server with:
//! - Availability gate in front of every route
//! - Permissive CORS
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod gate;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerError};
