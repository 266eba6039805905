pub mod health_controller;
pub mod summarize_controller;
pub mod upload_controller;
