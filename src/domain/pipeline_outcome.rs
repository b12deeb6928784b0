use std::fmt;

use super::AudioMetadata;

/// The single value a pipeline run reports to the boundary layer.
#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    Success {
        metadata: AudioMetadata,
        transcript: String,
    },
    ValidationFailure {
        reason: String,
    },
    ProcessingFailure {
        stage: PipelineStage,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Normalize,
    Vad,
    Transcribe,
    Persist,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Normalize => "normalize",
            PipelineStage::Vad => "vad",
            PipelineStage::Transcribe => "transcribe",
            PipelineStage::Persist => "persist",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
