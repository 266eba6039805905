use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::{
    multipart::{MultipartForm, Part},
    TestServer,
};
use serde_json::Value;

use docsum_service::{
    adapters::{router, state::AppState},
    application::services::{ChatCompletion, ChatMessage, ObjectStorage},
    services::error::{CompletionError, StorageError},
};

struct StubStorage {
    fail: bool,
    calls: Mutex<Vec<(String, String)>>,
}

impl StubStorage {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            fail,
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ObjectStorage for StubStorage {
    async fn put_object(
        &self,
        key: &str,
        _bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.calls
            .lock()
            .unwrap()
            .push((key.to_string(), content_type.to_string()));
        if self.fail {
            return Err(StorageError::ProviderError("bucket unavailable".to_string()));
        }
        Ok(key.to_string())
    }
}

struct StubCompletion {
    response: Result<String, ()>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl StubCompletion {
    fn new(response: Result<String, ()>) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ChatCompletion for StubCompletion {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, CompletionError> {
        self.calls.lock().unwrap().push(messages);
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(()) => Err(CompletionError::Unauthorized("invalid api key".to_string())),
        }
    }
}

fn server_with(storage: Arc<StubStorage>, completion: Arc<StubCompletion>) -> TestServer {
    let app_state = AppState {
        storage,
        completion,
    };
    TestServer::new(router(app_state)).unwrap()
}

#[tokio::test]
async fn upload_without_file_field_is_a_validation_error() {
    let storage = StubStorage::new(false);
    let server = server_with(storage.clone(), StubCompletion::new(Ok(String::new())));

    let form = MultipartForm::new().add_text("note", "no file here");
    let response = server.post("/api/upload").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "No file provided");
    assert!(storage.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn upload_stores_file_under_uploads_prefix() {
    let storage = StubStorage::new(false);
    let server = server_with(storage.clone(), StubCompletion::new(Ok(String::new())));

    let part = Part::bytes(b"%PDF-1.4".to_vec())
        .file_name("report.pdf")
        .mime_type("application/pdf");
    let form = MultipartForm::new().add_part("file", part);
    let response = server.post("/api/upload").multipart(form).await;

    response.assert_status_ok();
    let body: Value = response.json();
    let path = body["path"].as_str().unwrap();
    assert!(path.starts_with("uploads/"));
    assert!(path.ends_with("-report.pdf"));

    let calls = storage.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, "application/pdf");
}

#[tokio::test]
async fn upload_surfaces_storage_failure_as_error_json() {
    let storage = StubStorage::new(true);
    let server = server_with(storage, StubCompletion::new(Ok(String::new())));

    let part = Part::bytes(b"data".to_vec())
        .file_name("notes.txt")
        .mime_type("text/plain");
    let form = MultipartForm::new().add_part("file", part);
    let response = server.post("/api/upload").multipart(form).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("bucket unavailable"));
}

#[tokio::test]
async fn summarize_returns_completion_text() {
    let completion = StubCompletion::new(Ok("This document covers X, Y, Z.".to_string()));
    let server = server_with(StubStorage::new(false), completion.clone());

    let response = server
        .post("/api/summarize")
        .json(&serde_json::json!({ "text": "Please summarize this document: report.pdf." }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["summary"], "This document covers X, Y, Z.");

    // System instruction first, user text second.
    let calls = completion.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][0].role, "system");
    assert_eq!(calls[0][1].role, "user");
    assert_eq!(
        calls[0][1].content,
        "Please summarize this document: report.pdf."
    );
}

#[tokio::test]
async fn summarize_masks_upstream_diagnostics() {
    let completion = StubCompletion::new(Err(()));
    let server = server_with(StubStorage::new(false), completion);

    let response = server
        .post("/api/summarize")
        .json(&serde_json::json!({ "text": "anything" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body, serde_json::json!({ "error": "AI processing failed" }));
}

#[tokio::test]
async fn health_check_reports_running_backend() {
    let server = server_with(StubStorage::new(false), StubCompletion::new(Ok(String::new())));

    let response = server.get("/api/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["message"], "Backend is running");
}
