mod silero_detector;
mod symphonia_normalizer;
mod symphonia_probe;

pub use silero_detector::{segments_from_frame_probabilities, SileroSpeechDetector, FRAME_SIZE};
pub use symphonia_normalizer::SymphoniaNormalizer;
pub use symphonia_probe::SymphoniaAudioProbe;
