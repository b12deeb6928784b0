use std::sync::Mutex;

use voice_activity_detector::VoiceActivityDetector;

use crate::application::ports::{SpeechDetector, SpeechDetectorError};
use crate::domain::{NormalizedAudio, SpeechSegment};

/// Samples per VAD frame, the Silero chunk size for 16 kHz audio.
pub const FRAME_SIZE: usize = 512;

/// Silero VAD over fixed 512-sample frames. The model carries inference
/// state between frames, so predictions are serialized behind a mutex.
pub struct SileroSpeechDetector {
    model: Mutex<VoiceActivityDetector>,
}

impl SileroSpeechDetector {
    pub fn new() -> Result<Self, SpeechDetectorError> {
        let model = VoiceActivityDetector::builder()
            .sample_rate(NormalizedAudio::SAMPLE_RATE_HZ as i64)
            .chunk_size(FRAME_SIZE)
            .build()
            .map_err(|e| SpeechDetectorError::ModelInit(e.to_string()))?;

        tracing::info!("Silero VAD model initialized");

        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl SpeechDetector for SileroSpeechDetector {
    fn detect(
        &self,
        samples: &[f32],
        threshold: f32,
    ) -> Result<Vec<SpeechSegment>, SpeechDetectorError> {
        let mut model = self
            .model
            .lock()
            .map_err(|_| SpeechDetectorError::Detection("model lock poisoned".to_string()))?;

        let mut probabilities = Vec::with_capacity(samples.len() / FRAME_SIZE + 1);
        for frame in samples.chunks(FRAME_SIZE) {
            probabilities.push(model.predict(frame.iter().copied()));
        }

        Ok(segments_from_frame_probabilities(
            &probabilities,
            threshold,
            FRAME_SIZE,
            samples.len(),
        ))
    }
}

/// Merge consecutive speech-classified frames into ordered, disjoint
/// segments clamped to the sample count.
pub fn segments_from_frame_probabilities(
    probabilities: &[f32],
    threshold: f32,
    frame_size: usize,
    total_samples: usize,
) -> Vec<SpeechSegment> {
    let mut segments: Vec<SpeechSegment> = Vec::new();

    for (index, probability) in probabilities.iter().enumerate() {
        if *probability < threshold {
            continue;
        }
        let start = index * frame_size;
        let end = (start + frame_size).min(total_samples);
        if start >= end {
            continue;
        }
        match segments.last_mut() {
            Some(last) if last.end_sample == start => last.end_sample = end,
            _ => segments.push(SpeechSegment {
                start_sample: start,
                end_sample: end,
            }),
        }
    }

    segments
}
