use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::{PipelineStats, SummarizeError};
use crate::domain::ContentId;
use crate::presentation::state::AppState;

use super::error_response::error_response;

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub content_id: Option<String>,
    pub media_url: Option<String>,
    pub transcript: Option<String>,
}

#[derive(Serialize)]
pub struct SummarizeResponse {
    pub content_id: String,
    pub summary: String,
    pub from_cache: bool,
    pub stats: PipelineStats,
}

#[derive(Serialize)]
pub struct CachedSummaryResponse {
    pub content_id: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct ClearResponse {
    pub content_id: String,
    pub removed: bool,
}

#[tracing::instrument(skip(state, request))]
pub async fn summarize_handler(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Response {
    let content_id = match resolve_content_id(&request) {
        Ok(id) => id,
        Err(message) => {
            tracing::warn!(error = %message, "Rejected summarize request");
            return error_response(StatusCode::BAD_REQUEST, "invalid_content_id", message);
        }
    };

    let transcript = match request.transcript {
        Some(text) => text,
        None => match &state.caption_source {
            Some(source) => match source.fetch(&content_id).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(content_id = %content_id, error = %e, "Captions unavailable");
                    return error_response(
                        StatusCode::NOT_FOUND,
                        "captions_unavailable",
                        e.to_string(),
                    );
                }
            },
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "missing_transcript",
                    "transcript is required when no caption source is configured",
                );
            }
        },
    };

    tracing::debug!(
        content_id = %content_id,
        transcript_chars = transcript.chars().count(),
        "Summarize request accepted"
    );

    match state
        .summarization_service
        .summarize(&content_id, &transcript)
        .await
    {
        Ok(outcome) => (
            StatusCode::OK,
            Json(SummarizeResponse {
                content_id: content_id.to_string(),
                summary: outcome.summary,
                from_cache: outcome.from_cache,
                stats: outcome.stats,
            }),
        )
            .into_response(),
        Err(SummarizeError::EmptyInput) => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "empty_input",
            "transcript contains no text to summarize",
        ),
        Err(e @ SummarizeError::Splitting(_)) => {
            tracing::error!(content_id = %content_id, error = %e, "Splitter misconfigured");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "configuration", e.to_string())
        }
        Err(e @ SummarizeError::FallbackFailed { .. }) => {
            tracing::error!(content_id = %content_id, error = %e, "Summarization failed");
            error_response(StatusCode::BAD_GATEWAY, "summary_failed", e.to_string())
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn get_summary_handler(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> Response {
    let content_id = match ContentId::parse(content_id) {
        Ok(id) => id,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, "invalid_content_id", e.to_string()),
    };

    match state.cache.get(&content_id).await {
        Ok(Some(cached)) => (
            StatusCode::OK,
            Json(CachedSummaryResponse {
                content_id: cached.content_id.to_string(),
                summary: cached.summary_text,
                created_at: cached.created_at,
            }),
        )
            .into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("no summary cached for {}", content_id),
        ),
        Err(e) => {
            tracing::error!(content_id = %content_id, error = %e, "Cache read failed");
            error_response(StatusCode::SERVICE_UNAVAILABLE, "cache_unavailable", e.to_string())
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn clear_summary_handler(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> Response {
    let content_id = match ContentId::parse(content_id) {
        Ok(id) => id,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, "invalid_content_id", e.to_string()),
    };

    match state.cache.clear(&content_id).await {
        Ok(removed) => {
            tracing::info!(content_id = %content_id, removed, "Cache cleared");
            (
                StatusCode::OK,
                Json(ClearResponse {
                    content_id: content_id.to_string(),
                    removed,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(content_id = %content_id, error = %e, "Cache clear failed");
            error_response(StatusCode::SERVICE_UNAVAILABLE, "cache_unavailable", e.to_string())
        }
    }
}

fn resolve_content_id(request: &SummarizeRequest) -> Result<ContentId, String> {
    match (&request.content_id, &request.media_url) {
        (Some(id), _) => ContentId::parse(id.clone()).map_err(|e| e.to_string()),
        (None, Some(url)) => ContentId::from_media_url(url).map_err(|e| e.to_string()),
        (None, None) => Err("either content_id or media_url is required".to_string()),
    }
}
