use async_trait::async_trait;

use crate::domain::{AudioMetadata, TranscriptionRecord};

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append a record and return the store-assigned id.
    async fn insert(
        &self,
        metadata: &AudioMetadata,
        transcription: &str,
    ) -> Result<i64, RecordStoreError>;

    /// All records, newest first.
    async fn list_all(&self) -> Result<Vec<TranscriptionRecord>, RecordStoreError>;

    /// Case-insensitive substring match over file name and transcript.
    async fn search(&self, keyword: &str) -> Result<Vec<TranscriptionRecord>, RecordStoreError>;

    async fn delete(&self, id: i64) -> Result<(), RecordStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecordStoreError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("record {0} not found")]
    NotFound(i64),
    #[error("store returned no record id")]
    MissingId,
}
