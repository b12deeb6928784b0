/// An uploaded audio file, copied out of the request body so no handle to
/// the upload stream outlives the boundary layer.
#[derive(Debug, Clone)]
pub struct UploadedAudio {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
