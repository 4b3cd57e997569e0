mod helpers;

use std::sync::Arc;
use std::time::Duration;

use podsum::application::services::Dispatcher;
use podsum::domain::{Chunk, FailureCategory};
use tokio::time::Instant;

use helpers::{MockBackend, content_id, pool_of};

fn chunks(count: usize) -> Vec<Chunk> {
    (0..count)
        .map(|i| Chunk::new(i, format!("chunk text number {}", i), i * 100))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn given_reversed_completion_order_when_dispatching_then_summaries_are_in_chunk_order() {
    let backends: Vec<Arc<MockBackend>> = ["a", "b", "c"]
        .iter()
        .map(|id| {
            Arc::new(MockBackend::new(id).with_chunk_delays(vec![
                Duration::from_millis(300),
                Duration::from_millis(200),
                Duration::from_millis(100),
            ]))
        })
        .collect();
    let pool = pool_of(&backends);
    let dispatcher = Dispatcher::new(Duration::ZERO, None);

    let report = dispatcher
        .dispatch(&content_id("episode-1"), chunks(3), &pool)
        .await;

    let order: Vec<usize> = report.summaries.iter().map(|s| s.chunk_index).collect();
    assert_eq!(order, vec![0, 1, 2]);
    assert_eq!(report.failed, 0);
}

#[tokio::test(start_paused = true)]
async fn given_more_chunks_than_backends_when_dispatching_then_assignment_is_cyclic() {
    let a = Arc::new(MockBackend::new("a"));
    let b = Arc::new(MockBackend::new("b"));
    let pool = pool_of(&[Arc::clone(&a), Arc::clone(&b)]);
    let dispatcher = Dispatcher::new(Duration::ZERO, None);

    let report = dispatcher
        .dispatch(&content_id("episode-1"), chunks(5), &pool)
        .await;

    assert_eq!(report.summaries.len(), 5);
    let mut a_chunks = a.chunk_numbers();
    let mut b_chunks = b.chunk_numbers();
    a_chunks.sort();
    b_chunks.sort();
    assert_eq!(a_chunks, vec![1, 3, 5]);
    assert_eq!(b_chunks, vec![2, 4]);
    assert_eq!(report.summaries[1].backend_id.as_str(), "b");
}

#[tokio::test(start_paused = true)]
async fn given_slow_backends_when_dispatching_then_no_backend_runs_two_chunks_at_once() {
    let backends: Vec<Arc<MockBackend>> = ["a", "b"]
        .iter()
        .map(|id| {
            Arc::new(MockBackend::new(id).with_chunk_delays(vec![Duration::from_millis(100)]))
        })
        .collect();
    let pool = pool_of(&backends);
    let dispatcher = Dispatcher::new(Duration::ZERO, None);

    let report = dispatcher
        .dispatch(&content_id("episode-1"), chunks(6), &pool)
        .await;

    assert_eq!(report.summaries.len(), 6);
    for backend in &backends {
        assert_eq!(backend.max_in_flight(), 1);
        assert_eq!(backend.calls(), 3);
    }
}

#[tokio::test(start_paused = true)]
async fn given_one_chunk_per_backend_when_dispatching_then_calls_overlap_in_time() {
    let backends: Vec<Arc<MockBackend>> = ["a", "b", "c"]
        .iter()
        .map(|id| {
            Arc::new(MockBackend::new(id).with_chunk_delays(vec![Duration::from_millis(100)]))
        })
        .collect();
    let pool = pool_of(&backends);
    let dispatcher = Dispatcher::new(Duration::ZERO, None);

    let started = Instant::now();
    let report = dispatcher
        .dispatch(&content_id("episode-1"), chunks(3), &pool)
        .await;

    assert!(started.elapsed() < Duration::from_millis(200));
    assert_eq!(report.summaries.len(), 3);
    for (position, backend) in backends.iter().enumerate() {
        assert_eq!(backend.chunk_numbers(), vec![position + 1]);
    }
}

#[tokio::test(start_paused = true)]
async fn given_pacing_when_dispatching_then_submissions_are_spaced() {
    let backends: Vec<Arc<MockBackend>> = ["a", "b", "c"]
        .iter()
        .map(|id| Arc::new(MockBackend::new(id)))
        .collect();
    let pool = pool_of(&backends);
    let dispatcher = Dispatcher::new(Duration::from_millis(500), None);

    let started = Instant::now();
    dispatcher
        .dispatch(&content_id("episode-1"), chunks(3), &pool)
        .await;

    assert!(started.elapsed() >= Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn given_failing_backend_when_dispatching_then_failures_are_counted_not_returned() {
    let a = Arc::new(MockBackend::new("a"));
    let b = Arc::new(MockBackend::new("b").failing_chunks());
    let pool = pool_of(&[a, b]);
    let dispatcher = Dispatcher::new(Duration::ZERO, None);

    let report = dispatcher
        .dispatch(&content_id("episode-1"), chunks(4), &pool)
        .await;

    let order: Vec<usize> = report.summaries.iter().map(|s| s.chunk_index).collect();
    assert_eq!(order, vec![0, 2]);
    assert_eq!(report.failed, 2);
    assert_eq!(report.total(), 4);
    assert!(report.summaries.iter().all(|s| s.is_success()));
}

#[tokio::test(start_paused = true)]
async fn given_deadline_when_chunk_is_too_slow_then_it_counts_as_failed() {
    let fast = Arc::new(MockBackend::new("fast").with_chunk_delays(vec![Duration::from_millis(50)]));
    let slow = Arc::new(MockBackend::new("slow").with_chunk_delays(vec![Duration::from_secs(5)]));
    let pool = pool_of(&[fast, slow]);
    let dispatcher = Dispatcher::new(Duration::ZERO, Some(Duration::from_millis(200)));

    let report = dispatcher
        .dispatch(&content_id("episode-1"), chunks(2), &pool)
        .await;

    assert_eq!(report.summaries.len(), 1);
    assert_eq!(report.summaries[0].chunk_index, 0);
    assert_eq!(report.failed, 1);
}

#[tokio::test]
async fn given_blank_backend_reply_when_summarizing_chunk_then_outcome_is_empty_response() {
    use podsum::application::ports::{BackendError, SummaryBackend};
    use podsum::application::services::summarize_chunk;
    use podsum::domain::BackendDescriptor;

    struct BlankBackend(BackendDescriptor);

    #[async_trait::async_trait]
    impl SummaryBackend for BlankBackend {
        fn descriptor(&self) -> &BackendDescriptor {
            &self.0
        }

        async fn invoke(&self, _prompt: &str) -> Result<String, BackendError> {
            Ok("\n  \n".to_string())
        }
    }

    let backend = BlankBackend(BackendDescriptor::new("blank", "m", "key-1234", "http://x"));
    let chunk = Chunk::new(0, "some text".to_string(), 0);

    let partial = summarize_chunk(&content_id("episode-1"), &chunk, &backend).await;

    assert!(!partial.is_success());
    assert_eq!(
        partial.failure().map(|f| f.category),
        Some(FailureCategory::EmptyResponse)
    );
}
