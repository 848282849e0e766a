//! Category handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};

use super::{ListParams, respond};
use crate::domain::NewCategory;
use crate::infrastructure::AppState;
use crate::services::category_service;

pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<NewCategory>,
) -> Response {
    respond(
        category_service::create_category(state.db(), payload).await,
        StatusCode::CREATED,
        "Category",
    )
}

pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let page = crate::services::catalog_service::Page::from(params);
    respond(
        category_service::list_categories(state.db(), page.skip, page.limit).await,
        StatusCode::OK,
        "Category",
    )
}

pub async fn get_category(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    respond(
        category_service::get_category(state.db(), id).await,
        StatusCode::OK,
        "Category",
    )
}

/// Copy one category row next to its source
#[utoipa::path(
    post,
    path = "/api/categories/{id}/copy",
    params(("id" = i32, Path, description = "Source category idx")),
    responses(
        (status = 201, description = "Category copied"),
        (status = 404, description = "Source category not found")
    )
)]
pub async fn copy_category(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    respond(
        category_service::copy_category(
            state.db(),
            id,
            &state.copy_settings.category_name_prefix,
        )
        .await,
        StatusCode::CREATED,
        "Source category",
    )
}
