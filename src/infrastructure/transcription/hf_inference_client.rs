use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, StatusCode};

use crate::application::ports::{Transcriber, TranscriberError};
use crate::domain::{NormalizedAudio, TranscriptionResult};

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Exponential backoff schedule for a cold model: attempt `k` (0-indexed)
/// waits `initial_delay * 2^k`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
}

impl RetryPolicy {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.initial_delay * 2u32.saturating_pow(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_secs(2),
        }
    }
}

/// Client for the HuggingFace Inference API. HTTP 503 means the model is
/// still loading; warm-up retries through it with exponential backoff, and
/// `transcribe` tolerates exactly one warm-up-then-retry cycle so request
/// latency stays bounded.
pub struct HfInferenceClient {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
    retry: RetryPolicy,
    // Advisory only: a cold client still attempts transcription directly.
    warmed: AtomicBool,
}

impl HfInferenceClient {
    pub fn new(
        model: &str,
        api_token: Option<String>,
        base_url: Option<String>,
        retry: RetryPolicy,
    ) -> Self {
        let base = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let endpoint = format!("{}/models/{}", base.trim_end_matches('/'), model);

        tracing::info!(endpoint = %endpoint, "Initialized transcription client");

        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_token,
            retry,
            warmed: AtomicBool::new(false),
        }
    }

    pub fn is_warm(&self) -> bool {
        self.warmed.load(Ordering::Relaxed)
    }

    async fn post_audio(&self, audio: &[u8]) -> Result<reqwest::Response, reqwest::Error> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "audio/wav")
            .body(audio.to_vec());
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }
        request.send().await
    }

    /// One second of 16 kHz silence, the smallest probe the model accepts.
    fn warm_up_probe() -> Vec<u8> {
        NormalizedAudio::from_samples(vec![0.0; NormalizedAudio::SAMPLE_RATE_HZ as usize])
            .to_wav_bytes()
    }
}

#[async_trait]
impl Transcriber for HfInferenceClient {
    async fn warm_up(&self) -> bool {
        tracing::info!(endpoint = %self.endpoint, "Warming up transcription model");
        let probe = Self::warm_up_probe();

        for attempt in 0..self.retry.max_retries {
            match self.post_audio(&probe).await {
                Ok(response) => {
                    let status = response.status();
                    tracing::debug!(status = %status, "Warm-up response");

                    if status == StatusCode::OK {
                        tracing::info!("Transcription model ready");
                        self.warmed.store(true, Ordering::Relaxed);
                        return true;
                    }

                    if status == StatusCode::SERVICE_UNAVAILABLE {
                        let wait = self.retry.delay_for(attempt);
                        tracing::info!(
                            wait_secs = wait.as_secs(),
                            "Model still loading, backing off"
                        );
                        tokio::time::sleep(wait).await;
                        continue;
                    }

                    let body = response.text().await.unwrap_or_default();
                    tracing::error!(status = %status, body = %body, "Unexpected warm-up status");
                    return false;
                }
                Err(e) => {
                    let wait = self.retry.delay_for(attempt);
                    tracing::warn!(
                        error = %e,
                        attempt = attempt + 1,
                        wait_secs = wait.as_secs(),
                        "Warm-up request failed, retrying"
                    );
                    tokio::time::sleep(wait).await;
                }
            }
        }

        tracing::error!(
            attempts = self.retry.max_retries,
            "Model warm-up exhausted retries"
        );
        false
    }

    async fn transcribe(&self, audio_wav: &[u8]) -> Result<TranscriptionResult, TranscriberError> {
        tracing::debug!(bytes = audio_wav.len(), "Sending audio to inference API");

        let mut response = self
            .post_audio(audio_wav)
            .await
            .map_err(|e| TranscriberError::RequestFailed(e.to_string()))?;

        // A loading model gets one full warm-up cycle and a single retry.
        if response.status() == StatusCode::SERVICE_UNAVAILABLE {
            tracing::debug!("Model not ready, starting warm-up sequence");
            if !self.warm_up().await {
                tracing::warn!("Warm-up did not confirm readiness, retrying transcription anyway");
            }
            response = self
                .post_audio(audio_wav)
                .await
                .map_err(|e| TranscriberError::RequestFailed(e.to_string()))?;
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranscriberError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let raw_response: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranscriberError::InvalidResponse(e.to_string()))?;

        let text = raw_response
            .get("text")
            .and_then(|value| value.as_str())
            .ok_or_else(|| {
                TranscriberError::InvalidResponse("response missing text field".to_string())
            })?
            .trim()
            .to_string();

        self.warmed.store(true, Ordering::Relaxed);
        tracing::info!(chars = text.len(), "Transcription completed");

        Ok(TranscriptionResult { text, raw_response })
    }
}
