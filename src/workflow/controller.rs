use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::domain::models::FileData;
use crate::workflow::api::WorkflowApi;

/// Matches the hosting platform's synchronous-request payload ceiling.
pub const MAX_UPLOAD_BYTES: u64 = (4.5 * 1024.0 * 1024.0) as u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Upload,
    Summarize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    FileSelected,
    Uploading,
    Uploaded,
    Summarizing,
    Summarized,
    Failed { stage: Stage, message: String },
}

/// Pure projection of the workflow state into the status line shown to the
/// user. Every transition maps to exactly one string.
pub fn status_line(state: &WorkflowState) -> String {
    match state {
        WorkflowState::Idle => "Select a document to begin.".to_string(),
        WorkflowState::FileSelected => "Ready to upload.".to_string(),
        WorkflowState::Uploading => "Uploading...".to_string(),
        WorkflowState::Uploaded => "Upload complete. Ready to summarize.".to_string(),
        WorkflowState::Summarizing => "Summarizing...".to_string(),
        WorkflowState::Summarized => "Summary ready.".to_string(),
        WorkflowState::Failed {
            stage: Stage::Upload,
            message,
        } => format!("Upload failed: {}", message),
        WorkflowState::Failed {
            stage: Stage::Summarize,
            message,
        } => format!("Summarization failed: {}", message),
    }
}

struct Inner {
    state: WorkflowState,
    file: Option<FileData>,
    storage_path: Option<String>,
    summary: Option<String>,
    // Bumped on every selection change; in-flight completions compare their
    // captured value against it before touching state.
    run: u64,
}

/// Drives one selectFile -> upload -> summarize run at a time. Methods take
/// `&self` so a UI can share the controller behind an `Arc`; the inner lock is
/// never held across an await.
pub struct WorkflowController {
    api: Arc<dyn WorkflowApi>,
    max_upload_bytes: u64,
    inner: Mutex<Inner>,
}

impl WorkflowController {
    pub fn new(api: Arc<dyn WorkflowApi>) -> Self {
        Self::with_size_limit(api, MAX_UPLOAD_BYTES)
    }

    pub fn with_size_limit(api: Arc<dyn WorkflowApi>, max_upload_bytes: u64) -> Self {
        Self {
            api,
            max_upload_bytes,
            inner: Mutex::new(Inner {
                state: WorkflowState::Idle,
                file: None,
                storage_path: None,
                summary: None,
                run: 0,
            }),
        }
    }

    /// Replace the current selection. The storage path and summary belong to
    /// the old selection, so both reset with it, and any in-flight call for
    /// the old run is invalidated.
    pub fn select_file(&self, file: Option<FileData>) {
        let mut inner = self.inner.lock().unwrap();
        inner.run += 1;
        inner.storage_path = None;
        inner.summary = None;
        inner.state = if file.is_some() {
            WorkflowState::FileSelected
        } else {
            WorkflowState::Idle
        };
        inner.file = file;
    }

    /// Upload the selected file. No-op while a call is already in flight or
    /// when nothing is selected; an oversized file fails immediately without
    /// touching the network.
    pub async fn upload(&self) {
        let (file, run) = {
            let mut inner = self.inner.lock().unwrap();

            if matches!(
                inner.state,
                WorkflowState::Uploading | WorkflowState::Summarizing
            ) {
                debug!("Upload requested while a call is in flight, ignoring");
                return;
            }

            let Some(file) = inner.file.clone() else {
                return;
            };

            if file.size() > self.max_upload_bytes {
                inner.state = WorkflowState::Failed {
                    stage: Stage::Upload,
                    message: format!(
                        "file exceeds the {:.1} MB upload limit",
                        self.max_upload_bytes as f64 / (1024.0 * 1024.0)
                    ),
                };
                return;
            }

            inner.state = WorkflowState::Uploading;
            (file, inner.run)
        };

        let result = self.api.upload(&file).await;

        let mut inner = self.inner.lock().unwrap();
        if inner.run != run {
            debug!("Dropping stale upload result for a replaced selection");
            return;
        }

        match result {
            Ok(path) => {
                inner.storage_path = Some(path);
                inner.state = WorkflowState::Uploaded;
            }
            Err(e) => {
                inner.state = WorkflowState::Failed {
                    stage: Stage::Upload,
                    message: e.to_string(),
                };
            }
        }
    }

    /// Request a summary for the uploaded file. No-op unless the preceding
    /// upload has completed successfully; the UI disables the action instead
    /// of surfacing an error.
    pub async fn summarize(&self) {
        let (prompt, run) = {
            let mut inner = self.inner.lock().unwrap();

            if inner.state != WorkflowState::Uploaded {
                return;
            }

            let Some(file) = inner.file.as_ref() else {
                return;
            };

            let prompt = format!("Please summarize this document: {}.", file.filename);
            inner.state = WorkflowState::Summarizing;
            (prompt, inner.run)
        };

        let result = self.api.summarize(&prompt).await;

        let mut inner = self.inner.lock().unwrap();
        if inner.run != run {
            debug!("Dropping stale summary result for a replaced selection");
            return;
        }

        match result {
            Ok(text) => {
                // An empty summary is a valid model reply.
                inner.summary = Some(text);
                inner.state = WorkflowState::Summarized;
            }
            Err(e) => {
                // The uploaded path stays valid for a retry.
                inner.state = WorkflowState::Failed {
                    stage: Stage::Summarize,
                    message: e.to_string(),
                };
            }
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.inner.lock().unwrap().state.clone()
    }

    pub fn status(&self) -> String {
        status_line(&self.inner.lock().unwrap().state)
    }

    pub fn storage_path(&self) -> Option<String> {
        self.inner.lock().unwrap().storage_path.clone()
    }

    pub fn summary(&self) -> Option<String> {
        self.inner.lock().unwrap().summary.clone()
    }
}
