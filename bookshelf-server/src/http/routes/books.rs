//! Book endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::BookWithAuthor;

/// GET /books - all books with their author expanded
async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookWithAuthor>>, ApiError> {
    let books = state.store.list_books_with_authors().await?;
    Ok(Json(books))
}

/// Book routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/books", get(list_books))
}
