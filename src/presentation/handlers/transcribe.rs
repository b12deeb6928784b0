use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::ports::{RecordStore, Transcriber};
use crate::domain::{AudioMetadata, PipelineOutcome, UploadedAudio};
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub metadata: MetadataPayload,
    pub transcript: String,
}

#[derive(Serialize)]
pub struct MetadataPayload {
    pub file_name: String,
    pub audio_format: String,
    pub channel: u32,
    pub sample_rate: u32,
    pub duration: f64,
}

impl From<AudioMetadata> for MetadataPayload {
    fn from(metadata: AudioMetadata) -> Self {
        Self {
            file_name: metadata.file_name,
            audio_format: metadata.format,
            channel: metadata.channel_count,
            sample_rate: metadata.sample_rate_hz,
            duration: metadata.duration_seconds,
        }
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler<T, R>(
    State(state): State<AppState<T, R>>,
    mut multipart: Multipart,
) -> Response
where
    T: Transcriber + 'static,
    R: RecordStore + 'static,
{
    let upload = match read_audio_field(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            tracing::warn!("Transcription request with no audio field");
            return bad_request("No audio file uploaded");
        }
        Err(detail) => {
            tracing::error!(detail = %detail, "Failed to read upload");
            return bad_request(&detail);
        }
    };

    tracing::debug!(
        file = %upload.file_name,
        bytes = upload.bytes.len(),
        "Starting transcription request"
    );

    match state.pipeline.run(upload).await {
        PipelineOutcome::Success {
            metadata,
            transcript,
        } => (
            StatusCode::OK,
            Json(TranscribeResponse {
                metadata: metadata.into(),
                transcript,
            }),
        )
            .into_response(),
        PipelineOutcome::ValidationFailure { reason } => bad_request(&reason),
        // Stage failures, persistence included, surface as 400 to keep the
        // original wire contract.
        PipelineOutcome::ProcessingFailure { stage, reason } => {
            bad_request(&format!("{}: {}", stage, reason))
        }
    }
}

async fn read_audio_field(multipart: &mut Multipart) -> Result<Option<UploadedAudio>, String> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) => return Err(format!("Failed to read multipart: {}", e)),
        };

        if field.name() != Some("audio") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("unknown").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| format!("Failed to read file: {}", e))?;

        return Ok(Some(UploadedAudio {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }
}

fn bad_request(detail: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            detail: detail.to_string(),
        }),
    )
        .into_response()
}
