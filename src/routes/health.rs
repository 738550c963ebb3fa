use axum::Json;

use super::OkResponse;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = OkResponse)
    )
)]
pub async fn health_check() -> Json<OkResponse> {
    Json(OkResponse::new())
}
