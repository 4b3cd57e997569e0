use crate::application::ports::BackendError;
use crate::domain::{BulletRange, ContentId, PartialSummary};

use super::backend_selector::BackendSelector;
use super::{BackendPool, prompts};

/// Combines ordered partial summaries with one final backend call.
pub struct Reducer {
    selector: Box<dyn BackendSelector>,
    bullets: BulletRange,
}

impl Reducer {
    pub fn new(selector: Box<dyn BackendSelector>, bullets: BulletRange) -> Self {
        Self { selector, bullets }
    }

    /// `partials` must already be in ascending chunk order.
    pub async fn reduce(
        &self,
        content_id: &ContentId,
        partials: &[PartialSummary],
        pool: &BackendPool,
    ) -> Result<String, ReduceError> {
        if !partials.iter().any(PartialSummary::is_success) {
            return Err(ReduceError::NoPartialSummaries);
        }

        let position = self.selector.select(pool.len());
        let backend = pool
            .get(position)
            .ok_or(ReduceError::SelectorOutOfRange(position))?;
        let descriptor = backend.descriptor();

        tracing::info!(
            content_id = %content_id,
            partials = partials.len(),
            backend_id = %descriptor.id,
            credential = %descriptor.credential_hint(),
            "Reduce started"
        );

        let sections = prompts::combine_sections(partials);
        let prompt = prompts::reduce_prompt(&sections, self.bullets);

        let summary = backend.invoke(&prompt).await.map_err(ReduceError::Backend)?;
        if summary.trim().is_empty() {
            return Err(ReduceError::EmptySummary);
        }

        Ok(summary)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReduceError {
    #[error("no partial summaries to reduce")]
    NoPartialSummaries,
    #[error("selector picked position {0} outside the backend pool")]
    SelectorOutOfRange(usize),
    #[error("backend: {0}")]
    Backend(BackendError),
    #[error("backend returned an empty summary")]
    EmptySummary,
}
