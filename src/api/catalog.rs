//! Create/list handlers for the rows a book owns

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use sea_orm::DatabaseConnection;

use super::{ListParams, respond};
use crate::domain::{
    NewChapter, NewChapterUnitMapping, NewMeaningExample, NewMeaningSnyant, NewUnit, NewVoca,
    NewVocaDr, NewVocaMeaning, NewVocaType,
};
use crate::services::catalog_service;

pub async fn create_voca_type(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<NewVocaType>,
) -> Response {
    respond(
        catalog_service::create_voca_type(&db, payload).await,
        StatusCode::CREATED,
        "Voca type",
    )
}

pub async fn list_voca_types(
    State(db): State<DatabaseConnection>,
    Query(params): Query<ListParams>,
) -> Response {
    respond(
        catalog_service::list_voca_types(&db, params.into()).await,
        StatusCode::OK,
        "Voca type",
    )
}

pub async fn list_book_chapters(
    State(db): State<DatabaseConnection>,
    Path(book_id): Path<i32>,
    Query(params): Query<ListParams>,
) -> Response {
    respond(
        catalog_service::list_chapters(&db, book_id, params.into()).await,
        StatusCode::OK,
        "Book",
    )
}

pub async fn list_book_units(
    State(db): State<DatabaseConnection>,
    Path(book_id): Path<i32>,
    Query(params): Query<ListParams>,
) -> Response {
    respond(
        catalog_service::list_units(&db, book_id, params.into()).await,
        StatusCode::OK,
        "Book",
    )
}

pub async fn list_book_vocas(
    State(db): State<DatabaseConnection>,
    Path(book_id): Path<i32>,
    Query(params): Query<ListParams>,
) -> Response {
    respond(
        catalog_service::list_vocas(&db, book_id, params.into()).await,
        StatusCode::OK,
        "Book",
    )
}

pub async fn create_chapter(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<NewChapter>,
) -> Response {
    respond(
        catalog_service::create_chapter(&db, payload).await,
        StatusCode::CREATED,
        "Chapter",
    )
}

pub async fn create_unit(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<NewUnit>,
) -> Response {
    respond(
        catalog_service::create_unit(&db, payload).await,
        StatusCode::CREATED,
        "Unit",
    )
}

pub async fn create_mapping(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<NewChapterUnitMapping>,
) -> Response {
    respond(
        catalog_service::create_mapping(&db, payload).await,
        StatusCode::CREATED,
        "Chapter-unit mapping",
    )
}

pub async fn create_voca(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<NewVoca>,
) -> Response {
    respond(
        catalog_service::create_voca(&db, payload).await,
        StatusCode::CREATED,
        "Voca",
    )
}

pub async fn create_derivative(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<NewVocaDr>,
) -> Response {
    respond(
        catalog_service::create_derivative(&db, payload).await,
        StatusCode::CREATED,
        "Derivative",
    )
}

pub async fn create_meaning(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<NewVocaMeaning>,
) -> Response {
    respond(
        catalog_service::create_meaning(&db, payload).await,
        StatusCode::CREATED,
        "Meaning",
    )
}

pub async fn create_example(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<NewMeaningExample>,
) -> Response {
    respond(
        catalog_service::create_example(&db, payload).await,
        StatusCode::CREATED,
        "Example",
    )
}

pub async fn create_snyant(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<NewMeaningSnyant>,
) -> Response {
    respond(
        catalog_service::create_snyant(&db, payload).await,
        StatusCode::CREATED,
        "Synonym/antonym",
    )
}
