//! Core service functionality

pub mod config;
pub mod intake;
pub mod service;

pub use config::{ServerConfig, ServiceConfig, SessionConfig, CONFIG_FILE_NAME};
pub use intake::{IntakeError, IntakePipeline, IntakeStage, UploadCandidate};
pub use service::{DocumentService, ServiceError};
