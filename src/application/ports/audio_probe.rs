use crate::domain::{AudioMetadata, UploadedAudio};

/// Validates an upload and extracts its container metadata.
pub trait AudioProbe: Send + Sync {
    fn probe(&self, upload: &UploadedAudio) -> Result<AudioMetadata, AudioProbeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioProbeError {
    #[error("File must be an audio file")]
    NotAudio,
    #[error("invalid audio: {0}")]
    InvalidAudio(String),
}
