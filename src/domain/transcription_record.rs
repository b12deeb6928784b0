use chrono::{DateTime, Utc};

/// A persisted transcription. Insert-only; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionRecord {
    pub id: i64,
    pub file_name: String,
    pub audio_format: String,
    pub channel_count: u32,
    pub sample_rate_hz: u32,
    pub duration_seconds: f64,
    pub transcription: String,
    pub created_at: DateTime<Utc>,
}
