use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{info, warn};

use crate::{
    adapters::{dto::UploadResponse, state::AppState},
    application::error::ApplicationError,
    domain::models::FileData,
};

pub struct UploadController;

/// Key layout: `uploads/{unix_millis}-{filename}`, so re-uploads of the same
/// file name never collide across runs.
fn object_key(filename: &str) -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();

    let safe_filename = filename
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>();

    format!("uploads/{}-{}", timestamp, safe_filename)
}

impl UploadController {
    /// POST /api/upload
    /// Multipart body with a single `file` field.
    pub async fn upload(
        State(app_state): State<AppState>,
        mut multipart: Multipart,
    ) -> Result<Json<UploadResponse>, ApplicationError> {
        let mut file: Option<FileData> = None;

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            warn!("Invalid multipart data: {}", e);
            ApplicationError::BadRequest("Invalid request format".to_string())
        })? {
            if field.name() != Some("file") {
                continue;
            }

            let filename = field.file_name().unwrap_or("upload.bin").to_string();
            let mime_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await.map_err(|e| {
                warn!("Cannot read file bytes: {}", e);
                ApplicationError::BadRequest("Invalid file data".to_string())
            })?;

            file = Some(FileData::new(bytes.to_vec(), filename, mime_type));
        }

        let file = file.ok_or_else(|| {
            warn!("Missing required 'file' field in upload");
            ApplicationError::BadRequest("No file provided".to_string())
        })?;

        let key = object_key(&file.filename);
        info!(
            filename = %file.filename,
            size = file.size(),
            key = %key,
            "Uploading file to object storage"
        );

        let path = app_state
            .storage
            .put_object(&key, file.content, &file.mime_type)
            .await?;

        info!(path = %path, "Upload successful");

        Ok(Json(UploadResponse { path }))
    }
}
