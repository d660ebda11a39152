//! Sanitize command implementation

use crate::cli::commands::load_config;
use crate::cli::error::{CliError, CliResult};
use clap::Args;
use legaldoc::{sanitize_filename, UploadGate};
use std::path::PathBuf;

/// Run filenames through the intake rules without uploading anything
#[derive(Debug, Args)]
pub struct SanitizeArgs {
    /// Filenames as a client would send them
    #[arg(required = true, help = "Filenames to check")]
    names: Vec<String>,

    /// Configuration file
    #[arg(long, short, help = "Path to a legaldoc.toml configuration file")]
    config: Option<PathBuf>,
}

/// Verdict for one filename
#[derive(Debug, PartialEq, Eq)]
pub struct Verdict {
    pub sanitized: String,
    pub error: Option<String>,
}

pub fn check_name(gate: &UploadGate, name: &str) -> Verdict {
    let sanitized = sanitize_filename(name);
    let error = gate
        .check_candidate(name, 0)
        .and_then(|_| gate.check_sanitized(&sanitized))
        .err()
        .map(|e| e.to_string());

    Verdict {
        sanitized: sanitized.into_string(),
        error,
    }
}

pub async fn execute_sanitize(args: SanitizeArgs) -> CliResult<()> {
    let cwd = std::env::current_dir()?;
    let gate = load_config(args.config.as_deref(), &cwd)?.upload_gate();

    let mut rejected = 0;
    for name in &args.names {
        let verdict = check_name(&gate, name);
        match &verdict.error {
            None => println!("{:?} -> {:?}  accepted", name, verdict.sanitized),
            Some(reason) => {
                rejected += 1;
                println!("{:?} -> {:?}  rejected: {}", name, verdict.sanitized, reason);
            }
        }
    }

    if rejected > 0 {
        return Err(CliError::Rejected(rejected, args.names.len()));
    }
    Ok(())
}
