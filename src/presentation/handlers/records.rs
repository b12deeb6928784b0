use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::ports::{RecordStore, RecordStoreError, Transcriber};
use crate::domain::TranscriptionRecord;
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct RecordListResponse {
    pub record: usize,
    pub data: Vec<RecordPayload>,
}

#[derive(Serialize)]
pub struct RecordPayload {
    pub id: i64,
    pub file_name: String,
    pub audio_format: String,
    pub channel: u32,
    pub sample_rate: u32,
    pub duration: f64,
    pub transcription: String,
    pub created_at: DateTime<Utc>,
}

impl From<TranscriptionRecord> for RecordPayload {
    fn from(record: TranscriptionRecord) -> Self {
        Self {
            id: record.id,
            file_name: record.file_name,
            audio_format: record.audio_format,
            channel: record.channel_count,
            sample_rate: record.sample_rate_hz,
            duration: record.duration_seconds,
            transcription: record.transcription,
            created_at: record.created_at,
        }
    }
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub keyword: Option<String>,
}

#[derive(Deserialize)]
pub struct DeleteParams {
    pub record_id: i64,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub status: String,
    pub message: String,
}

#[tracing::instrument(skip(state))]
pub async fn list_records_handler<T, R>(State(state): State<AppState<T, R>>) -> Response
where
    T: Transcriber + 'static,
    R: RecordStore + 'static,
{
    match state.record_store.list_all().await {
        Ok(records) => record_list(records),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list transcriptions");
            store_error("Failed to retrieve transcriptions from database")
        }
    }
}

#[tracing::instrument(skip(state, params))]
pub async fn search_records_handler<T, R>(
    State(state): State<AppState<T, R>>,
    Query(params): Query<SearchParams>,
) -> Response
where
    T: Transcriber + 'static,
    R: RecordStore + 'static,
{
    let keyword = params.keyword.as_deref().map(str::trim).unwrap_or("");
    if keyword.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                detail: "Search by file name or transcription content".to_string(),
            }),
        )
            .into_response();
    }

    match state.record_store.search(keyword).await {
        Ok(records) => record_list(records),
        Err(e) => {
            tracing::error!(error = %e, keyword = %keyword, "Failed to search transcriptions");
            store_error("Failed to search transcriptions")
        }
    }
}

#[tracing::instrument(skip(state, params))]
pub async fn delete_record_handler<T, R>(
    State(state): State<AppState<T, R>>,
    Query(params): Query<DeleteParams>,
) -> Response
where
    T: Transcriber + 'static,
    R: RecordStore + 'static,
{
    match state.record_store.delete(params.record_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(DeleteResponse {
                status: "success".to_string(),
                message: format!("Record ID {} deleted successfully", params.record_id),
            }),
        )
            .into_response(),
        Err(RecordStoreError::NotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                detail: format!("Transcription with id {} not found", id),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, record_id = params.record_id, "Failed to delete transcription");
            store_error("Failed to delete transcription")
        }
    }
}

fn record_list(records: Vec<TranscriptionRecord>) -> Response {
    (
        StatusCode::OK,
        Json(RecordListResponse {
            record: records.len(),
            data: records.into_iter().map(Into::into).collect(),
        }),
    )
        .into_response()
}

fn store_error(detail: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            detail: detail.to_string(),
        }),
    )
        .into_response()
}
