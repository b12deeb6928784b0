use std::io::Cursor;
use std::path::Path;

use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioProbe, AudioProbeError};
use crate::domain::{AudioMetadata, UploadedAudio};

/// Probes container metadata without decoding the audio payload.
pub struct SymphoniaAudioProbe;

impl AudioProbe for SymphoniaAudioProbe {
    fn probe(&self, upload: &UploadedAudio) -> Result<AudioMetadata, AudioProbeError> {
        // Cheap rejection on the declared type before touching the bytes.
        if !upload.content_type.starts_with("audio/") {
            return Err(AudioProbeError::NotAudio);
        }

        let mss = MediaSourceStream::new(
            Box::new(Cursor::new(upload.bytes.clone())),
            Default::default(),
        );
        let mut hint = Hint::new();
        if let Some(ext) = extension(&upload.file_name) {
            hint.with_extension(&ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| AudioProbeError::InvalidAudio(format!("probe: {}", e)))?;

        let track = probed
            .format
            .default_track()
            .ok_or_else(|| AudioProbeError::InvalidAudio("no audio track found".to_string()))?;

        let params = &track.codec_params;
        let sample_rate_hz = params
            .sample_rate
            .ok_or_else(|| AudioProbeError::InvalidAudio("unknown sample rate".to_string()))?;
        let channel_count = params.channels.map(|c| c.count() as u32).unwrap_or(1);
        let duration_seconds = match params.n_frames {
            Some(frames) => frames as f64 / sample_rate_hz as f64,
            None => {
                tracing::debug!(file = %upload.file_name, "Container reports no frame count");
                0.0
            }
        };

        Ok(AudioMetadata {
            file_name: upload.file_name.clone(),
            format: format_label(&upload.file_name, &upload.content_type),
            channel_count,
            sample_rate_hz,
            duration_seconds,
        })
    }
}

fn extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

fn format_label(file_name: &str, content_type: &str) -> String {
    if let Some(ext) = extension(file_name) {
        return ext;
    }
    match content_type.trim_start_matches("audio/") {
        "mpeg" => "mp3".to_string(),
        "x-wav" | "wave" => "wav".to_string(),
        other => other.to_string(),
    }
}
