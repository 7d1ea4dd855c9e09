//! Router and request handlers.
//!
//! # Responsibility
//! - Define the public wire shapes and the four catalog routes.
//! - Reject malformed input before any storage access.
//! - Bridge synchronous catalog calls onto blocking worker threads.
//!
//! # Invariants
//! - The public review shapes never carry a book reference.
//! - Every handler releases its storage handle before the response is sent.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::error;
use serde::{Deserialize, Serialize};
use shelfmark_core::{Book, BookFilter, BookId, CatalogError, CatalogService, NewBook, Review};

use crate::error::ApiError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<CatalogService>,
}

/// Builds the HTTP router over one catalog service.
pub fn build_router(catalog: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/books", post(create_book).get(list_books))
        .route("/reviews", post(create_review))
        .route("/reviews/:book_id", get(list_reviews_for_book))
        .route("/health", get(health))
        .with_state(AppState { catalog })
}

/// Query filters for the book listing; absent fields match all values.
#[derive(Debug, Deserialize)]
struct ListBooksQuery {
    author: Option<String>,
    publication_year: Option<i32>,
}

/// Public insert shape for a review.
///
/// There is deliberately no book reference here: reviews created through
/// the public surface persist free-standing.
#[derive(Debug, Deserialize)]
struct NewReviewBody {
    text: String,
    rating: i32,
}

/// Public review projection; the stored book reference is not exposed.
#[derive(Debug, Serialize)]
struct ReviewBody {
    id: i64,
    text: String,
    rating: i32,
}

impl From<Review> for ReviewBody {
    fn from(value: Review) -> Self {
        Self {
            id: value.id,
            text: value.text,
            rating: value.rating,
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    version: &'static str,
}

async fn create_book(
    State(state): State<AppState>,
    body: Result<Json<NewBook>, JsonRejection>,
) -> Result<Json<Book>, ApiError> {
    let Json(book) = body.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let catalog = Arc::clone(&state.catalog);
    let created = run_blocking(move || catalog.create_book(book)).await?;
    Ok(Json(created))
}

async fn list_books(
    State(state): State<AppState>,
    query: Result<Query<ListBooksQuery>, QueryRejection>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let filter = BookFilter {
        author: query.author,
        publication_year: query.publication_year,
    };
    let catalog = Arc::clone(&state.catalog);
    let books = run_blocking(move || catalog.list_books(filter)).await?;
    Ok(Json(books))
}

async fn create_review(
    State(state): State<AppState>,
    body: Result<Json<NewReviewBody>, JsonRejection>,
) -> Result<Json<ReviewBody>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let catalog = Arc::clone(&state.catalog);
    let created = run_blocking(move || catalog.create_review(body.text, body.rating)).await?;
    Ok(Json(ReviewBody::from(created)))
}

async fn list_reviews_for_book(
    State(state): State<AppState>,
    path: Result<Path<BookId>, PathRejection>,
) -> Result<Json<Vec<ReviewBody>>, ApiError> {
    let Path(book_id) = path.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let catalog = Arc::clone(&state.catalog);
    let reviews = run_blocking(move || catalog.list_reviews_for_book(book_id)).await?;
    Ok(Json(reviews.into_iter().map(ReviewBody::from).collect()))
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        version: shelfmark_core::core_version(),
    })
}

/// Runs one synchronous catalog call on the blocking worker pool.
async fn run_blocking<T>(
    task: impl FnOnce() -> Result<T, CatalogError> + Send + 'static,
) -> Result<T, ApiError>
where
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(task).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(join_err) => {
            error!("event=http_worker module=server status=error error={join_err}");
            Err(ApiError::Internal)
        }
    }
}
