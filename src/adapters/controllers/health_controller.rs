use axum::Json;
use tracing::info;

use crate::adapters::dto::HealthResponse;

pub struct HealthController;

impl HealthController {
    /// GET /api/health
    pub async fn health_check() -> Json<HealthResponse> {
        info!("Health check requested");

        Json(HealthResponse {
            status: "healthy".to_string(),
            message: "Backend is running".to_string(),
        })
    }
}
