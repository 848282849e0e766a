use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use std::time::Duration;

use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`
use vocabook::api;
use vocabook::config::CopySettings;
use vocabook::db;
use vocabook::infrastructure::AppState;
use vocabook::models::{
    book, chapter, chapter_unit_mapping, meaning_example, meaning_snyant, unit, voca, voca_dr,
    voca_meaning,
};
use vocabook::seed::seed_demo_data;

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn total_rows(db: &DatabaseConnection) -> u64 {
    book::Entity::find().count(db).await.unwrap()
        + chapter::Entity::find().count(db).await.unwrap()
        + unit::Entity::find().count(db).await.unwrap()
        + chapter_unit_mapping::Entity::find().count(db).await.unwrap()
        + voca::Entity::find().count(db).await.unwrap()
        + voca_dr::Entity::find().count(db).await.unwrap()
        + voca_meaning::Entity::find().count(db).await.unwrap()
        + meaning_example::Entity::find().count(db).await.unwrap()
        + meaning_snyant::Entity::find().count(db).await.unwrap()
}

fn app(state: AppState) -> Router {
    api::api_router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_hello() {
    let db = setup_test_db().await;
    let req = Request::builder()
        .uri("/hello")
        .body(Body::empty())
        .unwrap();

    let response = app(AppState::new(db)).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "world");
}

#[tokio::test]
async fn test_copy_book_returns_new_book_and_summary() {
    let db = setup_test_db().await;
    let demo = seed_demo_data(&db).await.expect("Failed to seed");

    let response = app(AppState::new(db.clone()))
        .oneshot(post_empty(&format!("/books/{}/copy", demo.book)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["source_idx"], demo.book);
    assert_ne!(json["book"]["idx"], demo.book);
    assert_eq!(json["book"]["book_title"], "Essential Words 1 (revised)");
    assert_eq!(json["summary"]["vocas"], 1);
    assert_eq!(json["summary"]["skipped_mappings"], 0);

    assert_eq!(book::Entity::find().count(&db).await.unwrap(), 2);
    assert_eq!(voca::Entity::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn test_copy_unknown_book_is_404() {
    let db = setup_test_db().await;
    seed_demo_data(&db).await.expect("Failed to seed");

    let response = app(AppState::new(db.clone()))
        .oneshot(post_empty("/books/999/copy"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Original book not found"
    );
    assert_eq!(book::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_copy_store_failure_is_generic_500_and_writes_nothing() {
    let db = setup_test_db().await;
    let demo = seed_demo_data(&db).await.expect("Failed to seed");
    let before = total_rows(&db).await;

    db.execute_unprepared(
        "CREATE TRIGGER reject_snyants BEFORE INSERT ON pt_meaning_snyant \
         BEGIN SELECT RAISE(ABORT, 'snyant insert rejected'); END;",
    )
    .await
    .expect("Failed to create trigger");

    let response = app(AppState::new(db.clone()))
        .oneshot(post_empty(&format!("/books/{}/copy", demo.book)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(!String::from_utf8_lossy(&body).contains("rejected"));
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, json!({"error": "An internal error occurred"}));

    assert_eq!(total_rows(&db).await, before);
}

#[tokio::test]
async fn test_copy_past_deadline_is_500_and_writes_nothing() {
    let db = setup_test_db().await;
    let demo = seed_demo_data(&db).await.expect("Failed to seed");
    let before = total_rows(&db).await;
    let settings = CopySettings {
        timeout: Duration::ZERO,
        ..CopySettings::default()
    };

    let response = app(AppState::with_settings(db.clone(), settings))
        .oneshot(post_empty(&format!("/books/{}/copy", demo.book)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "An internal error occurred"})
    );
    assert_eq!(total_rows(&db).await, before);
}

#[tokio::test]
async fn test_copy_category_prefixes_name() {
    let db = setup_test_db().await;
    let app = app(AppState::new(db));

    let response = app
        .clone()
        .oneshot(post_json(
            "/categories",
            json!({"cate_name": "Grammar", "cate_lvl": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;

    let response = app
        .clone()
        .oneshot(post_empty(&format!("/categories/{}/copy", created["idx"])))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let copied = body_json(response).await;
    assert_eq!(copied["cate_name"], "Copy of Grammar");
    assert_eq!(copied["cate_lvl"], 1);
    assert_ne!(copied["idx"], created["idx"]);

    let response = app
        .oneshot(post_empty("/categories/777/copy"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_title_is_400() {
    let db = setup_test_db().await;

    let response = app(AppState::new(db))
        .oneshot(post_json(
            "/books",
            json!({"book_title": "   "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("book_title"));
}

#[tokio::test]
async fn test_list_book_children() {
    let db = setup_test_db().await;
    let demo = seed_demo_data(&db).await.expect("Failed to seed");
    let app = app(AppState::new(db));

    let req = Request::builder()
        .uri(format!("/books/{}/chapters", demo.book))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let req = Request::builder()
        .uri(format!("/books/{}/vocas?skip=0&limit=10", demo.book))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    let vocas = body_json(response).await;
    assert_eq!(vocas[0]["vc_word"], "abandon");

    let req = Request::builder()
        .uri("/books/31337/units")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_chapter_and_unit_lists_honour_window() {
    let db = setup_test_db().await;
    let demo = seed_demo_data(&db).await.expect("Failed to seed");
    let app = app(AppState::new(db));

    let req = Request::builder()
        .uri(format!("/books/{}/chapters?skip=1&limit=1", demo.book))
        .body(Body::empty())
        .unwrap();
    let chapters = body_json(app.clone().oneshot(req).await.unwrap()).await;
    let chapters = chapters.as_array().unwrap();
    assert_eq!(chapters.len(), 1);
    assert_eq!(chapters[0]["ch_title"], "Chapter 2");

    let req = Request::builder()
        .uri(format!("/books/{}/units?limit=1", demo.book))
        .body(Body::empty())
        .unwrap();
    let units = body_json(app.oneshot(req).await.unwrap()).await;
    let units = units.as_array().unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0]["un_title"], "Unit 1");
}
