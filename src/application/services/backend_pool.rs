use std::sync::Arc;

use crate::application::ports::SummaryBackend;

/// Fixed, ordered, non-empty set of interchangeable backends.
#[derive(Clone)]
pub struct BackendPool {
    backends: Vec<Arc<dyn SummaryBackend>>,
}

impl BackendPool {
    pub fn new(backends: Vec<Arc<dyn SummaryBackend>>) -> Result<Self, BackendPoolError> {
        if backends.is_empty() {
            return Err(BackendPoolError::Empty);
        }
        Ok(Self { backends })
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Arc<dyn SummaryBackend>> {
        self.backends.get(position)
    }

    /// Position of the backend that owns chunk `chunk_index` during dispatch.
    pub fn position_for_chunk(&self, chunk_index: usize) -> usize {
        chunk_index % self.backends.len()
    }

    pub fn for_chunk(&self, chunk_index: usize) -> &Arc<dyn SummaryBackend> {
        &self.backends[self.position_for_chunk(chunk_index)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn SummaryBackend>> {
        self.backends.iter()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BackendPoolError {
    #[error("backend pool must contain at least one backend")]
    Empty,
}
