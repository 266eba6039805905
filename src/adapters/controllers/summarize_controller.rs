use axum::{extract::State, Json};
use tracing::info;

use crate::{
    adapters::{
        dto::{SummarizeRequest, SummarizeResponse},
        state::AppState,
    },
    application::{error::ApplicationError, services::ChatMessage},
};

const SYSTEM_INSTRUCTION: &str = "You are a professional academic and document summarization \
assistant. Provide clear, well-structured summaries with explicit key points.";

pub struct SummarizeController;

impl SummarizeController {
    /// POST /api/summarize
    /// Body: { "text": "..." }
    pub async fn summarize(
        State(app_state): State<AppState>,
        Json(body): Json<SummarizeRequest>,
    ) -> Result<Json<SummarizeResponse>, ApplicationError> {
        info!(chars = body.text.len(), "Summarization requested");

        let messages = vec![
            ChatMessage::system(SYSTEM_INSTRUCTION),
            ChatMessage::user(body.text),
        ];

        let summary = app_state.completion.complete(messages).await?;

        info!(chars = summary.len(), "Summary generated");

        Ok(Json(SummarizeResponse { summary }))
    }
}
