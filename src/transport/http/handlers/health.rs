use axum::Json;
use serde_json::Value as JsonValue;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is alive")
    )
)]
pub async fn healthcheck_handler() -> Json<JsonValue> {
    Json(serde_json::json!({ "status": "ok" }))
}
