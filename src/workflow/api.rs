use async_trait::async_trait;
use reqwest::{header, multipart, Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use thiserror::Error;

use crate::domain::models::FileData;

/// Failures observed by the workflow when talking to the boundary endpoints.
/// `Remote` carries the `error` field of a JSON error body; `Transport` covers
/// everything that never produced a parseable JSON reply, such as a hosting
/// layer rejecting an oversized body with an HTML error page.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("{0}")]
    Remote(String),

    #[error("{0}")]
    Transport(String),
}

/// The two boundary calls the workflow controller can make.
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    async fn upload(&self, file: &FileData) -> Result<String, ApiError>;
    async fn summarize(&self, text: &str) -> Result<String, ApiError>;
}

pub struct HttpWorkflowApi {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct UploadReply {
    path: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummarizeReply {
    summary: Option<String>,
    error: Option<String>,
}

impl HttpWorkflowApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Decode a boundary reply, treating a non-JSON content type as a
    /// transport failure rather than attempting to parse it.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();

        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("application/json"))
            .unwrap_or(false);

        if !is_json {
            return Err(ApiError::Transport(format!(
                "server returned a non-JSON response (status {})",
                status.as_u16()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Transport(format!("invalid JSON response: {}", e)))
    }
}

#[async_trait]
impl WorkflowApi for HttpWorkflowApi {
    async fn upload(&self, file: &FileData) -> Result<String, ApiError> {
        let part = multipart::Part::bytes(file.content.clone())
            .file_name(file.filename.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/api/upload", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let reply: UploadReply = Self::decode(response).await?;
        if let Some(error) = reply.error {
            return Err(ApiError::Remote(error));
        }
        reply
            .path
            .ok_or_else(|| ApiError::Transport("response missing 'path'".to_string()))
    }

    async fn summarize(&self, text: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .post(format!("{}/api/summarize", self.base_url))
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let reply: SummarizeReply = Self::decode(response).await?;
        if let Some(error) = reply.error {
            return Err(ApiError::Remote(error));
        }
        reply
            .summary
            .ok_or_else(|| ApiError::Transport("response missing 'summary'".to_string()))
    }
}
