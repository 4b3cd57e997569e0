use crate::domain::{BulletRange, ContentId};

use super::backend_selector::BackendSelector;
use super::{BackendPool, prompts};

pub const DEFAULT_FALLBACK_MAX_CHARS: usize = 8000;

/// Single-shot truncate-and-summarize path, used only when map-reduce
/// produced nothing. Favours returning something over completeness.
pub struct FallbackController {
    selector: Box<dyn BackendSelector>,
    bullets: BulletRange,
    max_chars: usize,
}

impl FallbackController {
    pub fn new(selector: Box<dyn BackendSelector>, bullets: BulletRange, max_chars: usize) -> Self {
        Self {
            selector,
            bullets,
            max_chars,
        }
    }

    /// Returns `None` when the call fails or yields only whitespace.
    pub async fn fallback(
        &self,
        content_id: &ContentId,
        text: &str,
        pool: &BackendPool,
    ) -> Option<String> {
        let position = self.selector.select(pool.len());
        let backend = pool.get(position)?;
        let descriptor = backend.descriptor();

        let truncated = prompts::truncate_chars(text, self.max_chars);
        tracing::info!(
            content_id = %content_id,
            backend_id = %descriptor.id,
            credential = %descriptor.credential_hint(),
            truncated = truncated.len() != text.len(),
            "Fallback started"
        );

        let prompt = prompts::fallback_prompt(&truncated, self.bullets);
        match backend.invoke(&prompt).await {
            Ok(summary) if !summary.trim().is_empty() => Some(summary),
            Ok(_) => {
                tracing::warn!(content_id = %content_id, outcome = "empty_response", "Fallback failed");
                None
            }
            Err(e) => {
                tracing::warn!(
                    content_id = %content_id,
                    backend_id = %descriptor.id,
                    outcome = %e.category(),
                    error = %e,
                    "Fallback failed"
                );
                None
            }
        }
    }
}
