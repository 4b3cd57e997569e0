use crate::application::ports::SummaryBackend;
use crate::domain::{Chunk, ContentId, FailureCategory, PartialSummary};

use super::prompts;

/// Summarizes one chunk on one backend. Never fails: every backend error
/// is folded into a failed `PartialSummary`.
pub async fn summarize_chunk(
    content_id: &ContentId,
    chunk: &Chunk,
    backend: &dyn SummaryBackend,
) -> PartialSummary {
    let descriptor = backend.descriptor();
    let prompt = prompts::chunk_prompt(chunk);

    let summary = match backend.invoke(&prompt).await {
        Ok(text) if text.trim().is_empty() => PartialSummary::failed(
            chunk.index,
            descriptor.id.clone(),
            FailureCategory::EmptyResponse,
            "backend returned an empty summary",
        ),
        Ok(text) => PartialSummary::summarized(chunk.index, descriptor.id.clone(), text),
        Err(e) => PartialSummary::failed(
            chunk.index,
            descriptor.id.clone(),
            e.category(),
            e.to_string(),
        ),
    };

    match summary.failure() {
        None => tracing::info!(
            content_id = %content_id,
            chunk_index = chunk.index,
            backend_id = %descriptor.id,
            credential = %descriptor.credential_hint(),
            outcome = "success",
            "Chunk settled"
        ),
        Some(failure) => tracing::warn!(
            content_id = %content_id,
            chunk_index = chunk.index,
            backend_id = %descriptor.id,
            credential = %descriptor.credential_hint(),
            outcome = %failure.category,
            error = %failure.message,
            "Chunk settled"
        ),
    }

    summary
}
