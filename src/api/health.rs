use axum::Json;
use serde_json::{Value, json};

pub async fn hello() -> Json<Value> {
    Json(json!({"message": "world"}))
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "vocabook",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
