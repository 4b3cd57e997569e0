use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::application::ports::{CacheError, SummaryCache};
use crate::domain::{ContentId, SummaryResult};

/// Process-local summary cache. Contents are lost on restart.
#[derive(Default)]
pub struct InMemorySummaryCache {
    entries: DashMap<ContentId, SummaryResult>,
}

impl InMemorySummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl SummaryCache for InMemorySummaryCache {
    async fn get(&self, content_id: &ContentId) -> Result<Option<SummaryResult>, CacheError> {
        Ok(self.entries.get(content_id).map(|entry| entry.value().clone()))
    }

    async fn put(&self, result: &SummaryResult) -> Result<(), CacheError> {
        match self.entries.entry(result.content_id.clone()) {
            Entry::Occupied(_) => Err(CacheError::AlreadyExists(result.content_id.clone())),
            Entry::Vacant(slot) => {
                slot.insert(result.clone());
                Ok(())
            }
        }
    }

    async fn clear(&self, content_id: &ContentId) -> Result<bool, CacheError> {
        Ok(self.entries.remove(content_id).is_some())
    }
}
