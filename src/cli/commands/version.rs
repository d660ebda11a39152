//! Version command implementation

use crate::cli::commands::load_config;
use crate::cli::error::CliResult;
use clap::Args;
use legaldoc::ServiceConfig;
use std::path::PathBuf;

/// Display the legaldoc version and the intake limits in effect
#[derive(Debug, Args)]
pub struct VersionArgs {
    /// Configuration file
    #[arg(long, short, help = "Path to a legaldoc.toml configuration file")]
    config: Option<PathBuf>,
}

/// Version line followed by the upload policy the service would enforce
pub fn version_report(config: &ServiceConfig) -> String {
    let gate = config.upload_gate();
    format!(
        "legaldoc {}\n  accepts:    {}\n  max upload: {} bytes\n  uploads to: {}",
        legaldoc::VERSION,
        gate.allowed_extensions().join(", "),
        gate.max_bytes(),
        config.upload_dir.display()
    )
}

pub async fn execute_version(args: VersionArgs) -> CliResult<()> {
    let cwd = std::env::current_dir()?;
    let config = load_config(args.config.as_deref(), &cwd)?;
    println!("{}", version_report(&config));
    Ok(())
}
