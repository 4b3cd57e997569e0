use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::application::ports::{CacheError, SummaryCache, TextSplitter, TextSplitterError};
use crate::domain::{BulletRange, ContentId, PipelineStage, SummaryPath, SummaryResult};

use super::backend_selector::{BackendSelector, SelectionPolicy};
use super::fallback::DEFAULT_FALLBACK_MAX_CHARS;
use super::single_flight::InFlightRegistry;
use super::{BackendPool, Dispatcher, FallbackController, Reducer};

/// Knobs for one summarization pipeline.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub dispatch_pacing: Duration,
    pub dispatch_deadline: Option<Duration>,
    pub fallback_max_chars: usize,
    pub final_bullets: BulletRange,
    pub final_selection: SelectionPolicy,
    pub single_flight: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            dispatch_pacing: Duration::from_millis(500),
            dispatch_deadline: None,
            fallback_max_chars: DEFAULT_FALLBACK_MAX_CHARS,
            final_bullets: BulletRange::default(),
            final_selection: SelectionPolicy::default(),
            single_flight: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub chunks_total: usize,
    pub chunks_succeeded: usize,
    pub chunks_failed: usize,
    pub backends: usize,
    pub path: SummaryPath,
}

#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    pub summary: String,
    pub from_cache: bool,
    pub stats: PipelineStats,
}

/// Cache-first map-reduce summarization with a single-shot fallback.
pub struct SummarizationService {
    cache: Arc<dyn SummaryCache>,
    splitter: Arc<dyn TextSplitter>,
    pool: BackendPool,
    dispatcher: Dispatcher,
    reducer: Reducer,
    fallback: FallbackController,
    in_flight: Option<InFlightRegistry>,
    final_bullets: BulletRange,
    fallback_max_chars: usize,
}

impl SummarizationService {
    pub fn new(
        cache: Arc<dyn SummaryCache>,
        splitter: Arc<dyn TextSplitter>,
        pool: BackendPool,
        options: PipelineOptions,
    ) -> Self {
        Self {
            cache,
            splitter,
            pool,
            dispatcher: Dispatcher::new(options.dispatch_pacing, options.dispatch_deadline),
            reducer: Reducer::new(options.final_selection.build(), options.final_bullets),
            fallback: FallbackController::new(
                options.final_selection.build(),
                options.final_bullets,
                options.fallback_max_chars,
            ),
            in_flight: options.single_flight.then(InFlightRegistry::new),
            final_bullets: options.final_bullets,
            fallback_max_chars: options.fallback_max_chars,
        }
    }

    /// Replaces the strategies picking the reduction and fallback backends.
    pub fn with_selectors(
        mut self,
        reduce: Box<dyn BackendSelector>,
        fallback: Box<dyn BackendSelector>,
    ) -> Self {
        self.reducer = Reducer::new(reduce, self.final_bullets);
        self.fallback = FallbackController::new(fallback, self.final_bullets, self.fallback_max_chars);
        self
    }

    pub fn pool(&self) -> &BackendPool {
        &self.pool
    }

    pub async fn summarize(
        &self,
        content_id: &ContentId,
        transcript: &str,
    ) -> Result<SummaryOutcome, SummarizeError> {
        enter(content_id, PipelineStage::CacheCheck);
        if let Some(cached) = self.lookup(content_id).await {
            return Ok(self.cached_outcome(content_id, cached));
        }

        let _in_flight = match &self.in_flight {
            Some(registry) => {
                let guard = registry.acquire(content_id).await;
                // Whoever held the lock before us may have filled the cache.
                if let Some(cached) = self.lookup(content_id).await {
                    return Ok(self.cached_outcome(content_id, cached));
                }
                Some(guard)
            }
            None => None,
        };

        self.compute(content_id, transcript).await
    }

    async fn compute(
        &self,
        content_id: &ContentId,
        transcript: &str,
    ) -> Result<SummaryOutcome, SummarizeError> {
        enter(content_id, PipelineStage::Split);
        let chunks = self.splitter.split(transcript).map_err(|e| match e {
            TextSplitterError::EmptyInput => SummarizeError::EmptyInput,
            other => SummarizeError::Splitting(other),
        })?;

        enter(content_id, PipelineStage::Dispatch);
        let report = self.dispatcher.dispatch(content_id, chunks, &self.pool).await;

        let mut stats = PipelineStats {
            chunks_total: report.total(),
            chunks_succeeded: report.summaries.len(),
            chunks_failed: report.failed,
            backends: self.pool.len(),
            path: SummaryPath::Reduced,
        };

        let reduced = if report.summaries.is_empty() {
            None
        } else {
            enter(content_id, PipelineStage::Reduce);
            match self
                .reducer
                .reduce(content_id, &report.summaries, &self.pool)
                .await
            {
                Ok(summary) => Some(summary),
                Err(e) => {
                    tracing::warn!(content_id = %content_id, error = %e, "Reduction failed");
                    None
                }
            }
        };

        let summary = match reduced {
            Some(summary) => summary,
            None => {
                enter(content_id, PipelineStage::Fallback);
                stats.path = SummaryPath::Fallback;
                match self.fallback.fallback(content_id, transcript, &self.pool).await {
                    Some(summary) => summary,
                    None => {
                        enter(content_id, PipelineStage::Failed);
                        return Err(SummarizeError::FallbackFailed {
                            chunks_failed: stats.chunks_failed,
                        });
                    }
                }
            }
        };

        let (summary, from_cache) = self.store(content_id, summary).await;
        if from_cache {
            // Chunk counts still describe this run's work.
            stats.path = SummaryPath::Cache;
        }
        enter(content_id, PipelineStage::Done);

        Ok(SummaryOutcome {
            summary,
            from_cache,
            stats,
        })
    }

    /// Cache read that degrades to a miss when the store is unreachable.
    async fn lookup(&self, content_id: &ContentId) -> Option<SummaryResult> {
        match self.cache.get(content_id).await {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!(content_id = %content_id, error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }

    /// First writer wins: when another run already stored a summary, that
    /// stored text is returned instead of ours.
    async fn store(&self, content_id: &ContentId, summary: String) -> (String, bool) {
        let result = SummaryResult::new(content_id.clone(), summary);
        match self.cache.put(&result).await {
            Ok(()) => {
                tracing::info!(content_id = %content_id, outcome = "written", "Cache write");
                (result.summary_text, false)
            }
            Err(CacheError::AlreadyExists(_)) => {
                tracing::info!(content_id = %content_id, outcome = "already_exists", "Cache write");
                match self.lookup(content_id).await {
                    Some(existing) => (existing.summary_text, true),
                    None => (result.summary_text, false),
                }
            }
            Err(e) => {
                tracing::warn!(content_id = %content_id, outcome = "skipped", error = %e, "Cache write");
                (result.summary_text, false)
            }
        }
    }

    fn cached_outcome(&self, content_id: &ContentId, cached: SummaryResult) -> SummaryOutcome {
        tracing::info!(content_id = %content_id, outcome = "hit", "Cache check");
        enter(content_id, PipelineStage::Done);
        SummaryOutcome {
            summary: cached.summary_text,
            from_cache: true,
            stats: PipelineStats {
                chunks_total: 0,
                chunks_succeeded: 0,
                chunks_failed: 0,
                backends: self.pool.len(),
                path: SummaryPath::Cache,
            },
        }
    }
}

fn enter(content_id: &ContentId, stage: PipelineStage) {
    tracing::debug!(content_id = %content_id, stage = %stage, "Pipeline stage");
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("no text to summarize")]
    EmptyInput,
    #[error("text splitting: {0}")]
    Splitting(TextSplitterError),
    #[error("summary could not be generated ({chunks_failed} chunks failed and fallback failed)")]
    FallbackFailed { chunks_failed: usize },
}
