use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::AskError;
use crate::domain::ContentId;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error_response::error_response;

#[derive(Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct AnswerResponse {
    pub content_id: String,
    pub answer: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn ask_handler(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
    Json(request): Json<QuestionRequest>,
) -> Response {
    let content_id = match ContentId::parse(content_id) {
        Ok(id) => id,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, "invalid_content_id", e.to_string()),
    };

    tracing::debug!(
        content_id = %content_id,
        question = %sanitize_prompt(&request.question),
        "Processing question"
    );

    match state.qa_service.ask(&content_id, &request.question).await {
        Ok(answer) => (
            StatusCode::OK,
            Json(AnswerResponse {
                content_id: content_id.to_string(),
                answer,
            }),
        )
            .into_response(),
        Err(AskError::EmptyQuestion) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, "empty_question", "question is empty")
        }
        Err(e @ AskError::SummaryNotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, "not_found", e.to_string())
        }
        Err(e) => {
            tracing::error!(content_id = %content_id, error = %e, "Question failed");
            error_response(StatusCode::BAD_GATEWAY, "answer_failed", e.to_string())
        }
    }
}
