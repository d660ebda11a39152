//! HTTP server implementation for legaldoc
//!
//! This module provides the Axum REST API: document upload with
//! cookie-backed sessions, service status and the demo endpoints.

pub mod errors;
pub mod handlers;
pub mod models;
pub mod server;
pub mod session;

pub use errors::{HttpError, HttpResult};
pub use handlers::AppState;
/// Re-export commonly used types
pub use server::{build_router, LegalDocServer};
