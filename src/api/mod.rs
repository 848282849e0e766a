pub mod books;
pub mod catalog;
pub mod category;
pub mod health;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::services::catalog_service::Page;

/// `?skip=&limit=` of list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl From<ListParams> for Page {
    fn from(params: ListParams) -> Self {
        let default = Page::default();
        Page {
            skip: params.skip.unwrap_or(default.skip),
            limit: params.limit.unwrap_or(default.limit),
        }
    }
}

/// Generic 500 body; the cause is only logged.
pub(crate) fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "An internal error occurred"})),
    )
        .into_response()
}

/// Map a service error onto a response. Store and integrity failures are
/// logged with full detail and reported as a bare 500.
pub(crate) fn error_response(err: DomainError, subject: &str) -> Response {
    match err {
        DomainError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": format!("{} not found", subject)})),
        )
            .into_response(),
        DomainError::Validation(msg) => {
            (StatusCode::BAD_REQUEST, Json(json!({"error": msg}))).into_response()
        }
        other => {
            tracing::error!("{} request failed: {}", subject, other);
            internal_error()
        }
    }
}

pub(crate) fn respond<T: Serialize>(
    result: Result<T, DomainError>,
    status: StatusCode,
    subject: &str,
) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(e) => error_response(e, subject),
    }
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/hello", get(health::hello))
        .route("/health", get(health::health_check))
        // Categories
        .route(
            "/categories",
            get(category::list_categories).post(category::create_category),
        )
        .route("/categories/:id", get(category::get_category))
        .route("/categories/:id/copy", post(category::copy_category))
        // Vocabulary types
        .route(
            "/voca-types",
            get(catalog::list_voca_types).post(catalog::create_voca_type),
        )
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/:id", get(books::get_book))
        .route("/books/:id/copy", post(books::copy_book))
        .route("/books/:id/chapters", get(catalog::list_book_chapters))
        .route("/books/:id/units", get(catalog::list_book_units))
        .route("/books/:id/vocas", get(catalog::list_book_vocas))
        // Book contents
        .route("/chapters", post(catalog::create_chapter))
        .route("/units", post(catalog::create_unit))
        .route("/chapter-unit-mappings", post(catalog::create_mapping))
        .route("/vocas", post(catalog::create_voca))
        .route("/derivatives", post(catalog::create_derivative))
        .route("/meanings", post(catalog::create_meaning))
        .route("/examples", post(catalog::create_example))
        .route("/snyants", post(catalog::create_snyant))
        .with_state(state)
}
