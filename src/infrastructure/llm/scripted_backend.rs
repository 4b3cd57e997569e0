use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{BackendError, SummaryBackend};
use crate::domain::BackendDescriptor;

/// In-process backend with canned behaviour, for scaffold mode and tests.
pub struct ScriptedBackend {
    descriptor: BackendDescriptor,
    delay: Duration,
    failure: Option<BackendError>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(descriptor: BackendDescriptor) -> Self {
        Self {
            descriptor,
            delay: Duration::ZERO,
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Every invocation fails with `error`.
    pub fn failing(mut self, error: BackendError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SummaryBackend for ScriptedBackend {
    fn descriptor(&self) -> &BackendDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, prompt: &str) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        Ok(format!(
            "- Scripted summary from {} ({} prompt chars)",
            self.descriptor.id,
            prompt.chars().count()
        ))
    }
}
