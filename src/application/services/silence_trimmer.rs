use std::sync::Arc;

use crate::application::ports::{SpeechDetector, SpeechDetectorError};
use crate::domain::{NormalizedAudio, SpeechSegment};

/// Removes non-speech audio by concatenating the sample ranges the detector
/// classifies as speech, in order.
pub struct SilenceTrimmer {
    detector: Arc<dyn SpeechDetector>,
    threshold: f32,
}

impl SilenceTrimmer {
    pub fn new(detector: Arc<dyn SpeechDetector>, threshold: f32) -> Self {
        Self {
            detector,
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn trim(&self, audio: &NormalizedAudio) -> Result<NormalizedAudio, TrimError> {
        let samples = audio.samples();
        let segments = self.detector.detect(samples, self.threshold)?;

        // No speech at all is a valid outcome, not an error.
        if segments.is_empty() {
            tracing::debug!("No speech detected, returning empty audio");
            return Ok(NormalizedAudio::empty());
        }

        let kept: usize = segments.iter().map(SpeechSegment::len).sum();
        let mut speech = Vec::with_capacity(kept);
        for segment in &segments {
            if !segment.is_within(samples.len()) {
                return Err(SpeechDetectorError::Detection(format!(
                    "segment {}..{} outside 0..{}",
                    segment.start_sample,
                    segment.end_sample,
                    samples.len()
                ))
                .into());
            }
            speech.extend_from_slice(&samples[segment.start_sample..segment.end_sample]);
        }

        tracing::debug!(
            segments = segments.len(),
            kept_samples = speech.len(),
            total_samples = samples.len(),
            "Silence removed"
        );

        Ok(NormalizedAudio::from_samples(speech))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TrimError {
    #[error("voice activity detection: {0}")]
    Detector(#[from] SpeechDetectorError),
}
