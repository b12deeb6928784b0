/// The model's textual hypothesis plus the unprocessed response body, kept
/// for diagnostics.
#[derive(Debug, Clone)]
pub struct TranscriptionResult {
    pub text: String,
    pub raw_response: serde_json::Value,
}
