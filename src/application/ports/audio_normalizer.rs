use crate::domain::NormalizedAudio;

/// Converts arbitrary input audio into the canonical mono 16 kHz shape.
pub trait AudioNormalizer: Send + Sync {
    fn normalize(
        &self,
        bytes: &[u8],
        declared_format: &str,
    ) -> Result<NormalizedAudio, NormalizeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("decode failed at {step}: {detail}")]
    Decode { step: &'static str, detail: String },
}
