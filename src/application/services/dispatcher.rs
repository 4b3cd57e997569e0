use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::domain::{Chunk, ContentId, FailureCategory, PartialSummary};

use super::BackendPool;
use super::chunk_worker::summarize_chunk;

/// Fans chunks out over the backend pool.
///
/// Chunk `i` always goes to pool position `i % pool.len()`. Each backend
/// holds a single permit, so at most `pool.len()` calls are in flight and
/// no backend ever sees two chunks at once. Every chunk is awaited until it
/// settles; there is no early exit.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    pacing: Duration,
    deadline: Option<Duration>,
}

/// Successful partial summaries in ascending chunk order, plus how many
/// chunks produced nothing usable.
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    pub summaries: Vec<PartialSummary>,
    pub failed: usize,
}

impl DispatchReport {
    pub fn total(&self) -> usize {
        self.summaries.len() + self.failed
    }
}

impl Dispatcher {
    pub fn new(pacing: Duration, deadline: Option<Duration>) -> Self {
        Self { pacing, deadline }
    }

    pub async fn dispatch(
        &self,
        content_id: &ContentId,
        chunks: Vec<Chunk>,
        pool: &BackendPool,
    ) -> DispatchReport {
        let chunk_count = chunks.len();
        let permits: Vec<Arc<Semaphore>> =
            (0..pool.len()).map(|_| Arc::new(Semaphore::new(1))).collect();
        let deadline = self.deadline.map(|d| Instant::now() + d);

        tracing::info!(
            content_id = %content_id,
            chunks = chunk_count,
            backends = pool.len(),
            pacing_ms = self.pacing.as_millis() as u64,
            "Dispatch started"
        );

        let mut tasks = JoinSet::new();
        for (submitted, chunk) in chunks.into_iter().enumerate() {
            if submitted > 0 && !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }

            let permit = Arc::clone(&permits[pool.position_for_chunk(chunk.index)]);
            let backend = Arc::clone(pool.for_chunk(chunk.index));
            let content_id = content_id.clone();

            tasks.spawn(async move {
                let index = chunk.index;
                let backend_id = backend.descriptor().id.clone();

                let settle = async {
                    let Ok(_permit) = permit.acquire().await else {
                        return PartialSummary::failed(
                            index,
                            backend_id.clone(),
                            FailureCategory::WorkerAborted,
                            "backend permit closed",
                        );
                    };
                    summarize_chunk(&content_id, &chunk, backend.as_ref()).await
                };

                let Some(at) = deadline else {
                    return settle.await;
                };

                match tokio::time::timeout_at(at, settle).await {
                    Ok(summary) => summary,
                    Err(_) => {
                        tracing::warn!(
                            content_id = %content_id,
                            chunk_index = index,
                            backend_id = %backend_id,
                            outcome = %FailureCategory::TimedOut,
                            "Chunk settled"
                        );
                        PartialSummary::failed(
                            index,
                            backend_id,
                            FailureCategory::TimedOut,
                            "dispatch deadline elapsed",
                        )
                    }
                }
            });
        }

        let mut summaries = Vec::with_capacity(chunk_count);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(summary) if summary.is_success() => summaries.push(summary),
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(content_id = %content_id, error = %e, "Chunk worker aborted");
                }
            }
        }

        summaries.sort_by_key(|s| s.chunk_index);
        let failed = chunk_count - summaries.len();

        tracing::info!(
            content_id = %content_id,
            succeeded = summaries.len(),
            failed = failed,
            "Dispatch settled"
        );

        DispatchReport { summaries, failed }
    }
}
