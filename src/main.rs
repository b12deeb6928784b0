use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use voxscribe::application::ports::Transcriber;
use voxscribe::application::services::{SilenceTrimmer, TranscriptionPipeline};
use voxscribe::infrastructure::audio::{
    SileroSpeechDetector, SymphoniaAudioProbe, SymphoniaNormalizer,
};
use voxscribe::infrastructure::observability::{init_tracing, TracingConfig};
use voxscribe::infrastructure::persistence::{create_pool, SqliteRecordStore};
use voxscribe::infrastructure::transcription::{HfInferenceClient, RetryPolicy};
use voxscribe::presentation::{create_router, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env();
    init_tracing(&TracingConfig::default());

    let pool = create_pool(&settings.database.url, settings.database.max_connections).await?;
    let record_store = Arc::new(SqliteRecordStore::new(pool.clone()));
    record_store.init_schema().await?;

    let detector = Arc::new(SileroSpeechDetector::new()?);

    let transcriber = Arc::new(HfInferenceClient::new(
        &settings.transcription.model,
        settings.transcription.api_token.clone(),
        settings.transcription.base_url.clone(),
        RetryPolicy {
            max_retries: settings.transcription.max_retries,
            initial_delay: settings.transcription.retry_delay,
        },
    ));

    // Best-effort: a cold model is not fatal, the first request retries.
    if !transcriber.warm_up().await {
        tracing::warn!("Model warm-up was not successful, but application will continue");
    }

    let pipeline = Arc::new(TranscriptionPipeline::new(
        Arc::new(SymphoniaAudioProbe),
        Arc::new(SymphoniaNormalizer),
        SilenceTrimmer::new(detector, settings.vad.silence_threshold),
        Arc::clone(&transcriber),
        Arc::clone(&record_store),
    ));

    let state = AppState {
        pipeline,
        record_store,
    };
    let router = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
