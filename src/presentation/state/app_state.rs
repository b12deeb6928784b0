use std::sync::Arc;

use crate::application::ports::{RecordStore, Transcriber};
use crate::application::services::TranscriptionPipeline;

pub struct AppState<T, R>
where
    T: Transcriber,
    R: RecordStore,
{
    pub pipeline: Arc<TranscriptionPipeline<T, R>>,
    pub record_store: Arc<R>,
}

impl<T, R> Clone for AppState<T, R>
where
    T: Transcriber,
    R: RecordStore,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            record_store: Arc::clone(&self.record_store),
        }
    }
}
