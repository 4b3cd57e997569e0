use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use podsum::application::ports::{CaptionSource, SummaryCache, TextSplitter};
use podsum::application::services::{QaService, SummarizationService};
use podsum::infrastructure::captions::LocalCaptionSource;
use podsum::infrastructure::llm::BackendFactory;
use podsum::infrastructure::observability::{TracingConfig, init_tracing};
use podsum::infrastructure::persistence::{
    InMemorySummaryCache, PgSummaryCache, create_pool, run_migrations,
};
use podsum::infrastructure::text_processing::RecursiveCharacterSplitter;
use podsum::presentation::config::{CacheProvider, CacheSettings};
use podsum::presentation::{AppState, Environment, ScaffoldConfig, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(
        environment.as_str(),
        &settings.logging,
    ));

    let scaffold = ScaffoldConfig::from_env();
    if scaffold.enabled {
        tracing::warn!(
            delay_ms = scaffold.mock_response_delay_ms,
            "Scaffold mode enabled, backends are scripted"
        );
    }

    let pool = BackendFactory::create_pool(&settings.backends, &scaffold)?;
    tracing::info!(backends = pool.len(), "Backend pool ready");

    let options = settings.summarizer.pipeline_options()?;
    let splitter: Arc<dyn TextSplitter> = Arc::new(RecursiveCharacterSplitter::new(
        settings.summarizer.chunk_size,
        settings.summarizer.chunk_overlap,
    )?);

    let cache = build_cache(&settings.cache).await?;

    let caption_source: Option<Arc<dyn CaptionSource>> =
        settings.captions.directory.as_ref().map(|dir| {
            tracing::info!(directory = %dir, "Local caption source enabled");
            Arc::new(LocalCaptionSource::new(dir)) as Arc<dyn CaptionSource>
        });

    let summarization_service = Arc::new(SummarizationService::new(
        Arc::clone(&cache),
        splitter,
        pool.clone(),
        options,
    ));
    let qa_service = Arc::new(QaService::new(Arc::clone(&cache), pool));

    let state = AppState {
        summarization_service,
        qa_service,
        cache,
        caption_source,
    };

    let router = create_router(state);

    let ip = settings
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid server host: {}", settings.server.host))?;
    let addr = SocketAddr::new(ip, settings.server.port);
    tracing::info!(%addr, environment = %environment, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

async fn build_cache(settings: &CacheSettings) -> anyhow::Result<Arc<dyn SummaryCache>> {
    match settings.provider {
        CacheProvider::Memory => {
            tracing::info!("Using in-memory summary cache");
            Ok(Arc::new(InMemorySummaryCache::new()))
        }
        CacheProvider::Postgres => {
            let url = settings
                .database_url
                .as_deref()
                .context("cache.database_url is required for the postgres provider")?;
            let pool = create_pool(url, settings.max_connections).await?;
            run_migrations(&pool).await?;
            tracing::info!("Using postgres summary cache");
            Ok(Arc::new(PgSummaryCache::new(pool)))
        }
    }
}
