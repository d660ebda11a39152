//! HTTP request handlers

pub mod canned;
pub mod status;
pub mod upload;

// Re-export AppState (used by all handlers)
pub use status::AppState;
