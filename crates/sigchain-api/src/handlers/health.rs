//! Health check handler

use crate::dto::{ApiResponse, HealthResponse};
use axum::Json;

/// Liveness probe. Returns 200 with the service status; axum's method
/// routing answers 405 to anything but GET.
pub async fn health_check() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::new(HealthResponse {
        status: "pass".to_string(),
        version: "v1".to_string(),
    }))
}
