use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::ContentId;

/// Lock table keyed by content id. Holding the guard marks a computation
/// for that id as in flight; other callers for the same id wait on it.
#[derive(Default)]
pub struct InFlightRegistry {
    locks: DashMap<ContentId, Arc<Mutex<()>>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, content_id: &ContentId) -> InFlightGuard<'_> {
        let lock = Arc::clone(
            self.locks
                .entry(content_id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        );
        let guard = lock.lock_owned().await;

        InFlightGuard {
            registry: self,
            content_id: content_id.clone(),
            guard: Some(guard),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.locks.len()
    }
}

pub struct InFlightGuard<'a> {
    registry: &'a InFlightRegistry,
    content_id: ContentId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the table itself still references an idle lock.
        self.registry
            .locks
            .remove_if(&self.content_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}
