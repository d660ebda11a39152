//! Upload validation

pub mod upload_gate;

pub use upload_gate::{UploadGate, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_UPLOAD_BYTES};
