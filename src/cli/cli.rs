//! Main CLI application structure

use clap::Parser;

use crate::cli::commands::{sanitize, serve, version, Commands};
use crate::cli::error::CliResult;

/// legaldoc CLI - Run and inspect the document intake service
#[derive(Debug, Parser)]
#[command(name = "legaldoc")]
#[command(version = legaldoc::VERSION)]
#[command(about = "legaldoc CLI - Run and inspect the document intake service")]
#[command(long_about = "legaldoc accepts PDF, DOCX and TXT uploads over HTTP.\n\n\
                         Configuration is resolved using this priority:\n\
                         1. Command-line flags\n\
                         2. LEGALDOC_UPLOAD_DIR and SESSION_SECRET environment variables\n\
                         3. legaldoc.toml (or the file given with --config)\n\
                         4. Built-in defaults\n\n\
                         Examples:\n\
                           legaldoc serve --port 5000             # Start the API\n\
                           legaldoc sanitize \"../My Contract.pdf\" # Preview intake rules")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> CliResult<()> {
        legaldoc::init_logging();

        let result = match self.command {
            Commands::Serve(args) => serve::execute_serve(args).await,
            Commands::Sanitize(args) => sanitize::execute_sanitize(args).await,
            Commands::Version(args) => version::execute_version(args).await,
        };

        if let Err(e) = &result {
            eprintln!("Error: {}", e);
        }
        result
    }
}
