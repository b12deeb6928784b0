use std::fmt;
use std::sync::Arc;

use crate::application::ports::{
    AudioNormalizer, AudioProbe, RecordStore, RecordStoreError, Transcriber,
};
use crate::application::services::SilenceTrimmer;
use crate::domain::{PipelineOutcome, PipelineStage, UploadedAudio};

/// Orchestrates one transcription request: probe, normalize, trim,
/// transcribe, persist. Strictly sequential; each stage failure maps to one
/// outcome branch and later stages never run.
pub struct TranscriptionPipeline<T, R>
where
    T: Transcriber,
    R: RecordStore,
{
    probe: Arc<dyn AudioProbe>,
    normalizer: Arc<dyn AudioNormalizer>,
    trimmer: SilenceTrimmer,
    transcriber: Arc<T>,
    record_store: Arc<R>,
}

impl<T, R> TranscriptionPipeline<T, R>
where
    T: Transcriber,
    R: RecordStore,
{
    pub fn new(
        probe: Arc<dyn AudioProbe>,
        normalizer: Arc<dyn AudioNormalizer>,
        trimmer: SilenceTrimmer,
        transcriber: Arc<T>,
        record_store: Arc<R>,
    ) -> Self {
        Self {
            probe,
            normalizer,
            trimmer,
            transcriber,
            record_store,
        }
    }

    pub async fn run(&self, upload: UploadedAudio) -> PipelineOutcome {
        let metadata = match self.probe.probe(&upload) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(file = %upload.file_name, error = %e, "Upload rejected");
                return PipelineOutcome::ValidationFailure {
                    reason: e.to_string(),
                };
            }
        };

        tracing::info!(
            file = %metadata.file_name,
            format = %metadata.format,
            channels = metadata.channel_count,
            sample_rate = metadata.sample_rate_hz,
            duration = metadata.duration_seconds,
            "Audio detected and processing"
        );

        let normalized = match self.normalizer.normalize(&upload.bytes, &metadata.format) {
            Ok(audio) => audio,
            Err(e) => return fail(PipelineStage::Normalize, e),
        };

        let trimmed = match self.trimmer.trim(&normalized) {
            Ok(audio) => audio,
            Err(e) => return fail(PipelineStage::Vad, e),
        };

        // An upload with no speech produces an empty transcript; the remote
        // model is not called on empty audio.
        let transcript = if trimmed.is_empty() {
            tracing::info!("No speech left after trimming, skipping transcription");
            String::new()
        } else {
            match self.transcriber.transcribe(&trimmed.to_wav_bytes()).await {
                Ok(result) => result.text,
                Err(e) => return fail(PipelineStage::Transcribe, e),
            }
        };

        match self.record_store.insert(&metadata, &transcript).await {
            Ok(id) if id > 0 => {
                tracing::info!(record_id = id, "Transcription stored");
            }
            Ok(_) => return fail(PipelineStage::Persist, RecordStoreError::MissingId),
            Err(e) => return fail(PipelineStage::Persist, e),
        }

        PipelineOutcome::Success {
            metadata,
            transcript,
        }
    }
}

fn fail(stage: PipelineStage, error: impl fmt::Display) -> PipelineOutcome {
    tracing::error!(stage = %stage, error = %error, "Pipeline stage failed");
    PipelineOutcome::ProcessingFailure {
        stage,
        reason: error.to_string(),
    }
}
