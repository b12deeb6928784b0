mod audio_metadata;
mod normalized_audio;
mod pipeline_outcome;
mod speech_segment;
mod transcription_record;
mod transcription_result;
mod uploaded_audio;

pub use audio_metadata::AudioMetadata;
pub use normalized_audio::NormalizedAudio;
pub use pipeline_outcome::{PipelineOutcome, PipelineStage};
pub use speech_segment::SpeechSegment;
pub use transcription_record::TranscriptionRecord;
pub use transcription_result::TranscriptionResult;
pub use uploaded_audio::UploadedAudio;
