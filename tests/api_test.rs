mod helpers;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use podsum::application::ports::{CaptionSource, SummaryCache, TextSplitter};
use podsum::application::services::{PipelineOptions, QaService, SummarizationService};
use podsum::infrastructure::captions::LocalCaptionSource;
use podsum::infrastructure::persistence::InMemorySummaryCache;
use podsum::infrastructure::text_processing::RecursiveCharacterSplitter;
use podsum::presentation::{AppState, create_router};

use helpers::{ANSWER, MockBackend, REDUCED_SUMMARY, pool_of};

fn app_with(
    backends: &[Arc<MockBackend>],
    caption_source: Option<Arc<dyn CaptionSource>>,
) -> Router {
    let cache: Arc<dyn SummaryCache> = Arc::new(InMemorySummaryCache::new());
    let splitter: Arc<dyn TextSplitter> =
        Arc::new(RecursiveCharacterSplitter::new(3000, 200).unwrap());
    let pool = pool_of(backends);
    let options = PipelineOptions {
        dispatch_pacing: Duration::ZERO,
        ..PipelineOptions::default()
    };

    let state = AppState {
        summarization_service: Arc::new(SummarizationService::new(
            Arc::clone(&cache),
            splitter,
            pool.clone(),
            options,
        )),
        qa_service: Arc::new(QaService::new(Arc::clone(&cache), pool)),
        cache,
        caption_source,
    };

    create_router(state)
}

fn app() -> Router {
    app_with(&[Arc::new(MockBackend::new("a"))], None)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn given_running_app_when_health_checked_then_returns_ok() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["backends"], 1);
}

#[tokio::test]
async fn given_request_id_header_when_calling_then_it_is_echoed() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-123");
}

#[tokio::test]
async fn given_transcript_when_summarizing_twice_then_second_response_is_cached() {
    let app = app();
    let request = json!({"content_id": "episode-1", "transcript": "A talk about traits."});

    let first = app
        .clone()
        .oneshot(post_json("/api/v1/summaries", request.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first = read_json(first).await;
    assert_eq!(first["summary"], REDUCED_SUMMARY);
    assert_eq!(first["from_cache"], false);
    assert_eq!(first["stats"]["path"], "reduced");

    let second = app
        .oneshot(post_json("/api/v1/summaries", request))
        .await
        .unwrap();
    let second = read_json(second).await;
    assert_eq!(second["from_cache"], true);
    assert_eq!(second["summary"], REDUCED_SUMMARY);
}

#[tokio::test]
async fn given_media_url_when_summarizing_then_content_id_is_derived() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/summaries",
            json!({"media_url": "https://youtu.be/dQw4w9WgXcQ", "transcript": "Some words."}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["content_id"], "dQw4w9WgXcQ");
}

#[tokio::test]
async fn given_blank_transcript_when_summarizing_then_returns_unprocessable() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/summaries",
            json!({"content_id": "episode-1", "transcript": "   "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = read_json(response).await;
    assert_eq!(json["kind"], "empty_input");
}

#[tokio::test]
async fn given_invalid_content_id_when_summarizing_then_returns_bad_request() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/summaries",
            json!({"content_id": "bad/id", "transcript": "words"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_every_backend_call_fails_when_summarizing_then_returns_bad_gateway() {
    let backend = Arc::new(MockBackend::new("a").failing_chunks().failing_fallback());
    let response = app_with(&[backend], None)
        .oneshot(post_json(
            "/api/v1/summaries",
            json!({"content_id": "episode-1", "transcript": "words"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn given_no_transcript_when_caption_file_exists_then_captions_are_summarized() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("episode-7.txt"), "caption text").unwrap();
    let source: Arc<dyn CaptionSource> = Arc::new(LocalCaptionSource::new(dir.path()));
    let backend = Arc::new(MockBackend::new("a"));

    let response = app_with(&[Arc::clone(&backend)], Some(source))
        .oneshot(post_json("/api/v1/summaries", json!({"content_id": "episode-7"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(backend.prompts()[0].contains("caption text"));
}

#[tokio::test]
async fn given_no_transcript_and_no_caption_source_when_summarizing_then_returns_bad_request() {
    let response = app()
        .oneshot(post_json("/api/v1/summaries", json!({"content_id": "episode-1"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_unknown_id_when_getting_summary_then_returns_not_found() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/summaries/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_summarized_id_when_getting_then_clearing_then_summary_is_gone() {
    let app = app();
    app.clone()
        .oneshot(post_json(
            "/api/v1/summaries",
            json!({"content_id": "episode-1", "transcript": "words"}),
        ))
        .await
        .unwrap();

    let fetched = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/summaries/episode-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(read_json(fetched).await["summary"], REDUCED_SUMMARY);

    let cleared = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/summaries/episode-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(read_json(cleared).await["removed"], true);

    let missing = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/summaries/episode-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_summarized_id_when_asking_question_then_returns_answer() {
    let app = app();
    app.clone()
        .oneshot(post_json(
            "/api/v1/summaries",
            json!({"content_id": "episode-1", "transcript": "words"}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/api/v1/summaries/episode-1/questions",
            json!({"question": "What was said?"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["answer"], ANSWER);
}

#[tokio::test]
async fn given_unsummarized_id_when_asking_question_then_returns_not_found() {
    let response = app()
        .oneshot(post_json(
            "/api/v1/summaries/episode-9/questions",
            json!({"question": "What was said?"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
