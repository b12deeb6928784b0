use async_trait::async_trait;

use crate::domain::TranscriptionResult;

#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Best-effort readiness probe against the remote model. Returns whether
    /// the model answered; failure is never fatal to the caller.
    async fn warm_up(&self) -> bool;

    async fn transcribe(&self, audio_wav: &[u8]) -> Result<TranscriptionResult, TranscriberError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriberError {
    #[error("api request failed: {0}")]
    RequestFailed(String),
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
