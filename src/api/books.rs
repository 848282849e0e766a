//! Book handlers, including the deep copy

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DatabaseConnection;

use super::{ListParams, error_response, respond};
use crate::domain::NewBook;
use crate::infrastructure::AppState;
use crate::services::{catalog_service, copy_book_and_dependents_within};

pub async fn create_book(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<NewBook>,
) -> Response {
    respond(
        catalog_service::create_book(&db, payload).await,
        StatusCode::CREATED,
        "Book",
    )
}

pub async fn list_books(
    State(db): State<DatabaseConnection>,
    Query(params): Query<ListParams>,
) -> Response {
    respond(
        catalog_service::list_books(&db, params.into()).await,
        StatusCode::OK,
        "Book",
    )
}

pub async fn get_book(State(db): State<DatabaseConnection>, Path(id): Path<i32>) -> Response {
    respond(
        catalog_service::get_book(&db, id).await,
        StatusCode::OK,
        "Book",
    )
}

/// Copy a book with every chapter, unit, mapping and word it owns
#[utoipa::path(
    post,
    path = "/api/books/{id}/copy",
    params(("id" = i32, Path, description = "Source book idx")),
    responses(
        (status = 201, description = "Book and dependents copied"),
        (status = 404, description = "Original book not found"),
        (status = 500, description = "Copy failed and was rolled back")
    )
)]
pub async fn copy_book(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    let settings = &state.copy_settings;

    match copy_book_and_dependents_within(
        &state.catalog_store,
        id,
        &settings.book_title_suffix,
        settings.timeout,
    )
    .await
    {
        Ok(copy) => (StatusCode::CREATED, Json(copy)).into_response(),
        Err(e) => error_response(e, "Original book"),
    }
}
