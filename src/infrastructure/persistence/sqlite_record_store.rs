use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::instrument;

use crate::application::ports::{RecordStore, RecordStoreError};
use crate::domain::{AudioMetadata, TranscriptionRecord};

pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the transcription table when it does not exist yet.
    pub async fn init_schema(&self) -> Result<(), RecordStoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transcription_result (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                file_name TEXT NOT NULL,
                audio_format TEXT NOT NULL,
                channel INTEGER NOT NULL,
                sample_rate INTEGER NOT NULL,
                duration REAL NOT NULL,
                transcription TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RecordStoreError::QueryFailed(e.to_string()))?;

        tracing::info!("Transcription table ready");
        Ok(())
    }
}

fn row_to_record(row: &SqliteRow) -> Result<TranscriptionRecord, sqlx::Error> {
    Ok(TranscriptionRecord {
        id: row.try_get("id")?,
        file_name: row.try_get("file_name")?,
        audio_format: row.try_get("audio_format")?,
        channel_count: row.try_get::<i64, _>("channel")? as u32,
        sample_rate_hz: row.try_get::<i64, _>("sample_rate")? as u32,
        duration_seconds: row.try_get("duration")?,
        transcription: row.try_get("transcription")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

fn query_failed(e: impl std::fmt::Display) -> RecordStoreError {
    RecordStoreError::QueryFailed(e.to_string())
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    #[instrument(skip(self, metadata, transcription), fields(file = %metadata.file_name))]
    async fn insert(
        &self,
        metadata: &AudioMetadata,
        transcription: &str,
    ) -> Result<i64, RecordStoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO transcription_result
                (file_name, audio_format, channel, sample_rate, duration, transcription, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&metadata.file_name)
        .bind(&metadata.format)
        .bind(metadata.channel_count as i64)
        .bind(metadata.sample_rate_hz as i64)
        .bind(metadata.duration_seconds)
        .bind(transcription)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;

        let id = result.last_insert_rowid();
        if id <= 0 {
            return Err(RecordStoreError::MissingId);
        }
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<TranscriptionRecord>, RecordStoreError> {
        let rows = sqlx::query(
            "SELECT * FROM transcription_result ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        rows.iter()
            .map(|row| row_to_record(row).map_err(query_failed))
            .collect()
    }

    #[instrument(skip(self))]
    async fn search(&self, keyword: &str) -> Result<Vec<TranscriptionRecord>, RecordStoreError> {
        let pattern = format!("%{}%", keyword);
        let rows = sqlx::query(
            r#"
            SELECT * FROM transcription_result
            WHERE file_name LIKE ?1 OR transcription LIKE ?1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        rows.iter()
            .map(|row| row_to_record(row).map_err(query_failed))
            .collect()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), RecordStoreError> {
        let result = sqlx::query("DELETE FROM transcription_result WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;

        if result.rows_affected() == 0 {
            return Err(RecordStoreError::NotFound(id));
        }
        Ok(())
    }
}
