use async_trait::async_trait;

use crate::domain::{ContentId, SummaryResult};

/// Persistent `content_id -> SummaryResult` store with first-writer-wins puts.
#[async_trait]
pub trait SummaryCache: Send + Sync {
    async fn get(&self, content_id: &ContentId) -> Result<Option<SummaryResult>, CacheError>;

    /// Stores `result` unless an entry for its content id already exists.
    async fn put(&self, result: &SummaryResult) -> Result<(), CacheError>;

    /// Removes the entry, returning whether one was present.
    async fn clear(&self, content_id: &ContentId) -> Result<bool, CacheError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("summary already cached for {0}")]
    AlreadyExists(ContentId),
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}
