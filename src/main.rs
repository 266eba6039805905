use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use docsum_service::{
    adapters::{router, state::AppState},
    application::services::{ChatCompletion, ObjectStorage},
    domain::config::Secrets,
    services::{DeepSeekClient, SupabaseStorage},
};

async fn hello_world() -> &'static str {
    "Hello, world!"
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let secrets = Secrets::from_env();

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .expect("PORT must be a valid u16");

    // Configure CORS
    let cors = if let Ok(allowed_origins) = std::env::var("CORS_ALLOWED_ORIGINS") {
        // Parse comma-separated origins
        let origins: Vec<_> = allowed_origins
            .split(',')
            .map(|s| s.trim().parse().expect("Invalid CORS origin"))
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Allow all origins if not specified (only for development)
        CorsLayer::permissive()
    };

    let storage =
        Arc::new(SupabaseStorage::new(secrets.supabase.clone())) as Arc<dyn ObjectStorage>;
    let completion =
        Arc::new(DeepSeekClient::new(secrets.deepseek.clone())) as Arc<dyn ChatCompletion>;

    let app_state = AppState {
        storage,
        completion,
    };

    tracing::info!(
        bucket = %secrets.supabase.bucket_name,
        "Starting docsum-service"
    );

    let app = Router::new()
        .route("/", get(hello_world))
        .merge(router(app_state))
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", port);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
