use crate::domain::SpeechSegment;

/// Classifies audio frames as speech or non-speech.
///
/// Input must already be mono 16 kHz. Segments come back ordered by
/// `start_sample` and disjoint; an empty result means no speech was found.
pub trait SpeechDetector: Send + Sync {
    fn detect(
        &self,
        samples: &[f32],
        threshold: f32,
    ) -> Result<Vec<SpeechSegment>, SpeechDetectorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechDetectorError {
    #[error("detector initialization failed: {0}")]
    ModelInit(String),
    #[error("detection failed: {0}")]
    Detection(String),
}
