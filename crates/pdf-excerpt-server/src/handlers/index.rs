use axum::Json;

use crate::models::HealthResponse;

pub async fn index() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
