mod api;
mod controller;

pub use api::{ApiError, HttpWorkflowApi, WorkflowApi};
pub use controller::{status_line, Stage, WorkflowController, WorkflowState, MAX_UPLOAD_BYTES};
