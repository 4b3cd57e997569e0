use std::fmt;

use super::BackendId;

/// Why a chunk produced no usable partial summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    Unauthenticated,
    QuotaExceeded,
    ConnectionFailed,
    MalformedResponse,
    EmptyResponse,
    TimedOut,
    WorkerAborted,
}

impl FailureCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCategory::Unauthenticated => "unauthenticated",
            FailureCategory::QuotaExceeded => "quota_exceeded",
            FailureCategory::ConnectionFailed => "connection_failed",
            FailureCategory::MalformedResponse => "malformed_response",
            FailureCategory::EmptyResponse => "empty_response",
            FailureCategory::TimedOut => "timed_out",
            FailureCategory::WorkerAborted => "worker_aborted",
        }
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkFailure {
    pub category: FailureCategory,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOutcome {
    Summarized(String),
    Failed(ChunkFailure),
}

/// Result of exactly one attempt at summarizing one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialSummary {
    pub chunk_index: usize,
    pub backend_id: BackendId,
    pub outcome: ChunkOutcome,
}

impl PartialSummary {
    pub fn summarized(chunk_index: usize, backend_id: BackendId, text: String) -> Self {
        Self {
            chunk_index,
            backend_id,
            outcome: ChunkOutcome::Summarized(text),
        }
    }

    pub fn failed(
        chunk_index: usize,
        backend_id: BackendId,
        category: FailureCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            chunk_index,
            backend_id,
            outcome: ChunkOutcome::Failed(ChunkFailure {
                category,
                message: message.into(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ChunkOutcome::Summarized(_))
    }

    pub fn text(&self) -> Option<&str> {
        match &self.outcome {
            ChunkOutcome::Summarized(text) => Some(text),
            ChunkOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ChunkFailure> {
        match &self.outcome {
            ChunkOutcome::Summarized(_) => None,
            ChunkOutcome::Failed(failure) => Some(failure),
        }
    }
}
