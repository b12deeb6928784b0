mod hf_inference_client;

pub use hf_inference_client::{HfInferenceClient, RetryPolicy};
