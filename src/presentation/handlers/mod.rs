mod health;
mod records;
mod transcribe;

use serde::Serialize;

pub use health::health_handler;
pub use records::{delete_record_handler, list_records_handler, search_records_handler};
pub use transcribe::transcribe_handler;

/// Error payload shared by every endpoint.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}
