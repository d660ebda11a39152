//! CLI-specific error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Service error: {0}")]
    Service(#[from] legaldoc::ServiceError),

    #[error("Server error: {0}")]
    Server(String),

    #[error("{0} of {1} names would be rejected")]
    Rejected(usize, usize),
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Rejected(..) => 1,
            CliError::Config(_) => 2,
            CliError::Service(_) | CliError::Io(_) => 3,
            CliError::Server(_) => 4,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
