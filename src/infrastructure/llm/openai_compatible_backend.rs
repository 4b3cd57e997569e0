use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::{BackendError, SummaryBackend};
use crate::domain::BackendDescriptor;
use crate::infrastructure::observability::sanitize_prompt;

/// Chat-completions backend for any OpenAI-compatible endpoint
/// (OpenAI, Gemini's compatibility layer, Ollama, LM Studio, ...).
pub struct OpenAiCompatibleBackend {
    client: Client,
    descriptor: BackendDescriptor,
    temperature: f32,
    max_tokens: Option<usize>,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiCompatibleBackend {
    pub fn new(
        descriptor: BackendDescriptor,
        temperature: f32,
        max_tokens: Option<usize>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;
        Ok(Self {
            client,
            descriptor,
            temperature,
            max_tokens,
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.descriptor.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl SummaryBackend for OpenAiCompatibleBackend {
    fn descriptor(&self) -> &BackendDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, prompt: &str) -> Result<String, BackendError> {
        tracing::trace!(
            backend_id = %self.descriptor.id,
            prompt = %sanitize_prompt(prompt),
            "Sending completion request"
        );

        let request_body = ChatCompletionRequest {
            model: &self.descriptor.model_name,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.descriptor.credential.trim())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| BackendError::MalformedResponse("empty choices".to_string()))
    }
}

fn classify_status(status: StatusCode, body: String) -> BackendError {
    let detail = format!("HTTP {}: {}", status, sanitize_prompt(&body));
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Unauthenticated(detail),
        StatusCode::TOO_MANY_REQUESTS | StatusCode::PAYMENT_REQUIRED => {
            BackendError::QuotaExceeded(detail)
        }
        s if s.is_server_error() => BackendError::ConnectionFailed(detail),
        _ => BackendError::MalformedResponse(detail),
    }
}
