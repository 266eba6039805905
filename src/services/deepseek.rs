use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::{
    application::services::{ChatCompletion, ChatMessage},
    domain::config::DeepSeekSecrets,
    services::error::CompletionError,
};

const MODEL: &str = "deepseek-chat";

pub struct DeepSeekClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct CompletionReply {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

impl DeepSeekClient {
    pub fn new(secrets: DeepSeekSecrets) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Failed to build HTTP client, using default client");
                Client::default()
            });

        Self {
            client,
            base_url: secrets.base_url.trim_end_matches('/').to_string(),
            api_key: secrets.api_key,
        }
    }
}

#[async_trait]
impl ChatCompletion for DeepSeekClient {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": MODEL,
                "messages": messages,
                "stream": false,
            }))
            .send()
            .await
            .map_err(CompletionError::from)?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CompletionError::Unauthorized(error_text));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CompletionError::ProviderError(format!(
                "Completion failed with status {}: {}",
                status, error_text
            )));
        }

        let reply: CompletionReply = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        let choice = reply.choices.into_iter().next().ok_or_else(|| {
            CompletionError::MalformedResponse("response contains no choices".to_string())
        })?;

        choice.message.content.ok_or_else(|| {
            CompletionError::MalformedResponse("completion choice has no content".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> DeepSeekClient {
        DeepSeekClient::new(DeepSeekSecrets {
            base_url: server.uri(),
            api_key: "sk-test".to_string(),
        })
    }

    fn conversation() -> Vec<ChatMessage> {
        vec![
            ChatMessage::system("You summarize documents."),
            ChatMessage::user("Please summarize this document: report.pdf."),
        ]
    }

    #[tokio::test]
    async fn complete_returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "deepseek-chat",
                "stream": false,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "This document covers X, Y, Z." } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let summary = client_for(&server).complete(conversation()).await.unwrap();
        assert_eq!(summary, "This document covers X, Y, Z.");
    }

    #[tokio::test]
    async fn complete_accepts_empty_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "role": "assistant", "content": "" } }]
            })))
            .mount(&server)
            .await;

        let summary = client_for(&server).complete(conversation()).await.unwrap();
        assert_eq!(summary, "");
    }

    #[tokio::test]
    async fn complete_rejects_missing_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "cmpl-1"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete(conversation())
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn complete_maps_unauthorized_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete(conversation())
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::Unauthorized(_)));
    }
}
