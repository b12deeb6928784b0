use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{RecordStore, Transcriber};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    delete_record_handler, health_handler, list_records_handler, search_records_handler,
    transcribe_handler,
};
use crate::presentation::state::AppState;

const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub fn create_router<T, R>(state: AppState<T, R>) -> Router
where
    T: Transcriber + 'static,
    R: RecordStore + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/stt/transcribe", post(transcribe_handler::<T, R>))
        .route("/data/transcriptions", get(list_records_handler::<T, R>))
        .route("/data/search", get(search_records_handler::<T, R>))
        .route("/data/delete_record", delete(delete_record_handler::<T, R>))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
