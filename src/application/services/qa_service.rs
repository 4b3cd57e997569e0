use std::sync::Arc;

use crate::application::ports::{BackendError, CacheError, SummaryCache};
use crate::domain::ContentId;

use super::backend_selector::{BackendSelector, RoundRobinSelector};
use super::{BackendPool, prompts};

/// Answers questions about a media item using only its cached summary.
pub struct QaService {
    cache: Arc<dyn SummaryCache>,
    pool: BackendPool,
    selector: Box<dyn BackendSelector>,
}

impl QaService {
    pub fn new(cache: Arc<dyn SummaryCache>, pool: BackendPool) -> Self {
        Self {
            cache,
            pool,
            selector: Box::new(RoundRobinSelector::new()),
        }
    }

    pub fn with_selector(mut self, selector: Box<dyn BackendSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub async fn ask(&self, content_id: &ContentId, question: &str) -> Result<String, AskError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AskError::EmptyQuestion);
        }

        let summary = self
            .cache
            .get(content_id)
            .await
            .map_err(AskError::Cache)?
            .ok_or_else(|| AskError::SummaryNotFound(content_id.clone()))?;

        let position = self.selector.select(self.pool.len());
        let backend = self
            .pool
            .get(position)
            .ok_or(AskError::NoBackend(position))?;

        tracing::debug!(
            content_id = %content_id,
            backend_id = %backend.descriptor().id,
            "Answering question from cached summary"
        );

        let prompt = prompts::question_prompt(&summary.summary_text, question);
        let answer = backend.invoke(&prompt).await.map_err(AskError::Backend)?;

        if answer.trim().is_empty() {
            return Ok(prompts::UNKNOWN_ANSWER.to_string());
        }
        Ok(answer)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AskError {
    #[error("question is empty")]
    EmptyQuestion,
    #[error("no summary cached for {0}")]
    SummaryNotFound(ContentId),
    #[error("no backend at pool position {0}")]
    NoBackend(usize),
    #[error("cache: {0}")]
    Cache(CacheError),
    #[error("backend: {0}")]
    Backend(BackendError),
}
