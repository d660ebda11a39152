//! Command modules for CLI

pub mod sanitize;
pub mod serve;
pub mod version;

use clap::Subcommand;
use legaldoc::ServiceConfig;
use std::path::Path;

use crate::cli::error::{CliError, CliResult};

#[derive(Debug, Subcommand)]
#[command(about = "legaldoc CLI commands")]
pub enum Commands {
    /// Run the HTTP upload service
    #[command(about = "Serve the document upload API")]
    Serve(serve::ServeArgs),

    /// Show what the intake rules do with a filename
    #[command(about = "Sanitize filenames and check them against the upload gate")]
    Sanitize(sanitize::SanitizeArgs),

    /// Display version information
    #[command(about = "Display version information")]
    Version(version::VersionArgs),
}

/// Load configuration: explicit file, else `legaldoc.toml` in `cwd`, then env
pub(crate) fn load_config(config_file: Option<&Path>, cwd: &Path) -> CliResult<ServiceConfig> {
    let config = match config_file {
        Some(path) => ServiceConfig::load_from_file(path),
        None => ServiceConfig::discover(cwd),
    }
    .map_err(|e| CliError::Config(e.to_string()))?;
    Ok(config.with_env_overrides())
}
