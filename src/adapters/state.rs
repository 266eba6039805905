use std::sync::Arc;

use axum::extract::FromRef;

use crate::application::services::{ChatCompletion, ObjectStorage};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub storage: Arc<dyn ObjectStorage>,
    pub completion: Arc<dyn ChatCompletion>,
}
