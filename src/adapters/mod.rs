pub mod controllers;
pub mod dto;
pub mod error;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use controllers::{
    health_controller::HealthController, summarize_controller::SummarizeController,
    upload_controller::UploadController,
};
use state::AppState;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(HealthController::health_check))
        .route("/api/upload", post(UploadController::upload))
        .route("/api/summarize", post(SummarizeController::summarize))
        // The upload size policy is enforced client-side; the handler itself
        // accepts whatever the hosting layer lets through.
        .layer(DefaultBodyLimit::disable())
        .with_state(app_state)
}
