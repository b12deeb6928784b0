mod request_id;
mod telemetry;

pub use request_id::{request_id_middleware, REQUEST_ID_HEADER};
pub use telemetry::{init_tracing, TracingConfig};
