//! Serve command implementation

use crate::cli::commands::load_config;
use crate::cli::error::{CliError, CliResult};
use clap::Args;
use legaldoc::http::LegalDocServer;
use legaldoc::{DocumentService, ServiceConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Serve the legaldoc upload API
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Host to bind the server to
    #[arg(long, help = "Host to bind the server to (default 0.0.0.0)")]
    host: Option<String>,

    /// Port to bind the server to
    #[arg(long, help = "Port to bind the server to (default 5000)")]
    port: Option<u16>,

    /// Directory uploads are written to
    #[arg(long, help = "Directory accepted uploads are written to")]
    upload_dir: Option<PathBuf>,

    /// Configuration file
    #[arg(long, short, help = "Path to a legaldoc.toml configuration file")]
    config: Option<PathBuf>,
}

impl ServeArgs {
    /// Flags win over every other configuration source
    fn apply(&self, mut config: ServiceConfig) -> ServiceConfig {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = &self.upload_dir {
            config.upload_dir = dir.clone();
        }
        config
    }
}

pub async fn execute_serve(args: ServeArgs) -> CliResult<()> {
    let cwd = std::env::current_dir()?;
    let config = args.apply(load_config(args.config.as_deref(), &cwd)?);

    let host = config.server.host.clone();
    let port = config.server.port;

    info!("Starting legaldoc HTTP server on {}:{}", host, port);

    println!("legaldoc HTTP server starting...");
    println!("  Listening on: http://{}:{}", host, port);
    println!("  Uploads:      {}", config.upload_dir.display());

    let service = Arc::new(DocumentService::new(config)?);
    let server = LegalDocServer::new(service, &host, port).map_err(CliError::Config)?;

    // Blocks until shutdown
    server
        .serve()
        .await
        .map_err(|e| CliError::Server(e.to_string()))?;

    Ok(())
}
