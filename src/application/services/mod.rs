mod silence_trimmer;
mod transcription_pipeline;

pub use silence_trimmer::{SilenceTrimmer, TrimError};
pub use transcription_pipeline::TranscriptionPipeline;
