//! Author endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{Author, Book};

/// GET /authors - list all authors
async fn list_authors(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Author>>, ApiError> {
    let authors = state.store.list_authors().await?;
    Ok(Json(authors))
}

/// GET /authors/{id} - get a single author
async fn get_author(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Author>, ApiError> {
    let author = find_author(&state, &id).await?;
    Ok(Json(author))
}

/// GET /authors/{id}/books - books referencing the author, unexpanded
async fn list_author_books(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let author = find_author(&state, &id).await?;
    let books = state.store.books_by_author(author.id).await?;
    Ok(Json(books))
}

async fn find_author(state: &AppState, id: &str) -> Result<Author, ApiError> {
    state
        .store
        .find_author(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Author" })
}

/// Author routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/authors", get(list_authors))
        .route("/authors/{id}", get(get_author))
        .route("/authors/{id}/books", get(list_author_books))
}
