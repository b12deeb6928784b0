mod audio_normalizer;
mod audio_probe;
mod record_store;
mod speech_detector;
mod transcriber;

pub use audio_normalizer::{AudioNormalizer, NormalizeError};
pub use audio_probe::{AudioProbe, AudioProbeError};
pub use record_store::{RecordStore, RecordStoreError};
pub use speech_detector::{SpeechDetector, SpeechDetectorError};
pub use transcriber::{Transcriber, TranscriberError};
