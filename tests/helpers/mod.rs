#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use podsum::application::ports::{BackendError, CacheError, SummaryBackend, SummaryCache};
use podsum::application::services::BackendPool;
use podsum::domain::{BackendDescriptor, ContentId, SummaryResult};

pub const REDUCED_SUMMARY: &str = "- final summary";
pub const FALLBACK_SUMMARY: &str = "- fallback summary";
pub const ANSWER: &str = "The host talks about Rust.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Chunk,
    Reduce,
    Fallback,
    Question,
}

impl PromptKind {
    pub fn of(prompt: &str) -> Self {
        if prompt.contains("Section Summaries:") {
            PromptKind::Reduce
        } else if prompt.contains("Transcript Chunk ") {
            PromptKind::Chunk
        } else if prompt.contains("User Question:") {
            PromptKind::Question
        } else {
            PromptKind::Fallback
        }
    }
}

/// Chunk number (1-based) announced in a chunk prompt.
pub fn chunk_number(prompt: &str) -> Option<usize> {
    let rest = prompt.split("Transcript Chunk ").nth(1)?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Counting backend that answers by prompt kind and can be told to fail
/// any of them.
pub struct MockBackend {
    descriptor: BackendDescriptor,
    chunk_delays: Vec<Duration>,
    chunk_error: Option<BackendError>,
    reduce_error: Option<BackendError>,
    fallback_error: Option<BackendError>,
    blank_answers: bool,
    prompts: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockBackend {
    pub fn new(id: &str) -> Self {
        Self {
            descriptor: BackendDescriptor::new(id, "mock-model", "sk-test-credential", "http://mock"),
            chunk_delays: Vec::new(),
            chunk_error: None,
            reduce_error: None,
            fallback_error: None,
            blank_answers: false,
            prompts: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Delay for chunk number `n` is `delays[(n - 1) % delays.len()]`.
    pub fn with_chunk_delays(mut self, delays: Vec<Duration>) -> Self {
        self.chunk_delays = delays;
        self
    }

    pub fn failing_chunks(mut self) -> Self {
        self.chunk_error = Some(BackendError::QuotaExceeded("rate limited".to_string()));
        self
    }

    pub fn failing_reduce(mut self) -> Self {
        self.reduce_error = Some(BackendError::ConnectionFailed("reset".to_string()));
        self
    }

    pub fn failing_fallback(mut self) -> Self {
        self.fallback_error = Some(BackendError::Unauthenticated("bad key".to_string()));
        self
    }

    pub fn with_blank_answers(mut self) -> Self {
        self.blank_answers = true;
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn calls_of(&self, kind: PromptKind) -> usize {
        self.prompts()
            .iter()
            .filter(|p| PromptKind::of(p) == kind)
            .count()
    }

    pub fn chunk_numbers(&self) -> Vec<usize> {
        self.prompts()
            .iter()
            .filter_map(|p| chunk_number(p))
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SummaryBackend for MockBackend {
    fn descriptor(&self) -> &BackendDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, prompt: &str) -> Result<String, BackendError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let kind = PromptKind::of(prompt);
        if kind == PromptKind::Chunk && !self.chunk_delays.is_empty() {
            let n = chunk_number(prompt).unwrap_or(1);
            let delay = self.chunk_delays[(n - 1) % self.chunk_delays.len()];
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let failure = match kind {
            PromptKind::Chunk => self.chunk_error.clone(),
            PromptKind::Reduce => self.reduce_error.clone(),
            PromptKind::Fallback => self.fallback_error.clone(),
            PromptKind::Question => None,
        };
        if let Some(error) = failure {
            return Err(error);
        }

        if self.blank_answers && kind == PromptKind::Question {
            return Ok("   ".to_string());
        }

        Ok(match kind {
            PromptKind::Chunk => format!(
                "- point from chunk {}",
                chunk_number(prompt).unwrap_or_default()
            ),
            PromptKind::Reduce => REDUCED_SUMMARY.to_string(),
            PromptKind::Fallback => FALLBACK_SUMMARY.to_string(),
            PromptKind::Question => ANSWER.to_string(),
        })
    }
}

pub fn pool_of(backends: &[Arc<MockBackend>]) -> BackendPool {
    BackendPool::new(
        backends
            .iter()
            .map(|b| Arc::clone(b) as Arc<dyn SummaryBackend>)
            .collect(),
    )
    .unwrap()
}

pub fn content_id(raw: &str) -> ContentId {
    ContentId::parse(raw).unwrap()
}

/// Cache whose every operation reports the store as unreachable.
pub struct UnavailableCache;

#[async_trait::async_trait]
impl SummaryCache for UnavailableCache {
    async fn get(&self, _content_id: &ContentId) -> Result<Option<SummaryResult>, CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn put(&self, _result: &SummaryResult) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn clear(&self, _content_id: &ContentId) -> Result<bool, CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }
}

/// Cache that looks empty until the first write, which loses to an entry
/// another process stored in the meantime.
pub struct RacingCache {
    winner: SummaryResult,
    lost: AtomicBool,
}

impl RacingCache {
    pub fn new(content_id: ContentId, winner_text: &str) -> Self {
        Self {
            winner: SummaryResult::new(content_id, winner_text.to_string()),
            lost: AtomicBool::new(false),
        }
    }
}

#[async_trait::async_trait]
impl SummaryCache for RacingCache {
    async fn get(&self, _content_id: &ContentId) -> Result<Option<SummaryResult>, CacheError> {
        if self.lost.load(Ordering::SeqCst) {
            Ok(Some(self.winner.clone()))
        } else {
            Ok(None)
        }
    }

    async fn put(&self, result: &SummaryResult) -> Result<(), CacheError> {
        self.lost.store(true, Ordering::SeqCst);
        Err(CacheError::AlreadyExists(result.content_id.clone()))
    }

    async fn clear(&self, _content_id: &ContentId) -> Result<bool, CacheError> {
        Ok(false)
    }
}
