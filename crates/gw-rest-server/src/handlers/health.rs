//! Health check endpoint

use axum::Json;
use gw_rest_api_contract::HealthResponse;

/// Liveness probe; does not touch the repository
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
