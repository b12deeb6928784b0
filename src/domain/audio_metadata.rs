/// Container metadata of an upload, probed once before any processing and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioMetadata {
    pub file_name: String,
    pub format: String,
    pub channel_count: u32,
    pub sample_rate_hz: u32,
    pub duration_seconds: f64,
}
