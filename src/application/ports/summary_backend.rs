use async_trait::async_trait;

use crate::domain::{BackendDescriptor, FailureCategory};

/// A language-model endpoint that turns one prompt into one completion.
#[async_trait]
pub trait SummaryBackend: Send + Sync {
    fn descriptor(&self) -> &BackendDescriptor;

    async fn invoke(&self, prompt: &str) -> Result<String, BackendError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl BackendError {
    pub fn category(&self) -> FailureCategory {
        match self {
            BackendError::Unauthenticated(_) => FailureCategory::Unauthenticated,
            BackendError::QuotaExceeded(_) => FailureCategory::QuotaExceeded,
            BackendError::ConnectionFailed(_) => FailureCategory::ConnectionFailed,
            BackendError::MalformedResponse(_) => FailureCategory::MalformedResponse,
        }
    }
}
