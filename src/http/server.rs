//! Axum HTTP server implementation

use crate::core::config::ServerConfig;
use crate::core::service::DocumentService;
use crate::http::handlers::{canned, status, upload, AppState};
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::{info, warn};

/// Build the router serving every endpoint of the service
pub fn build_router(state: AppState) -> Router {
    let config = state.service.config();
    let body_limit = config.max_upload_bytes;
    let cors = build_cors_layer(&config.server);

    Router::new()
        .route("/", get(status::root))
        .route("/api/status", get(status::status))
        .route("/api/upload", post(upload::upload_document))
        .route("/simplify", post(canned::simplify))
        .route("/analyze", post(canned::analyze))
        .route("/chat", post(canned::chat))
        .route("/demo", get(canned::demo))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}

/// CORS policy; an empty origin list allows any origin
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if config.allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

/// legaldoc HTTP server
pub struct LegalDocServer {
    service: Arc<DocumentService>,
    addr: SocketAddr,
}

impl LegalDocServer {
    /// Create a new server instance
    pub fn new(service: Arc<DocumentService>, host: &str, port: u16) -> Result<Self, String> {
        let addr = Self::parse_address(host, port)
            .map_err(|e| format!("Invalid address: {}:{} - {}", host, port, e))?;

        Ok(Self { service, addr })
    }

    /// Parse and normalize host:port into a SocketAddr
    fn parse_address(host: &str, port: u16) -> Result<SocketAddr, String> {
        let normalized_host = Self::normalize_host(host);

        // IPv6 addresses need brackets
        let addr_str = if normalized_host.contains(':') {
            format!("[{}]:{}", normalized_host, port)
        } else {
            format!("{}:{}", normalized_host, port)
        };

        addr_str.parse().map_err(|_| {
            format!(
                "Unable to parse address '{}'. Use IP addresses like '127.0.0.1', '0.0.0.0' or '::1'",
                addr_str
            )
        })
    }

    /// Normalize hostnames for SocketAddr compatibility
    fn normalize_host(host: &str) -> String {
        match host {
            "localhost" => "127.0.0.1".to_string(),
            "::1" | "[::1]" => "::1".to_string(),
            "::" | "[::]" => "::".to_string(),
            _ => host.to_string(),
        }
    }

    /// Start the server and run until ctrl-c
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error>> {
        self.service.initialize().await?;

        let app = build_router(AppState::new(self.service.clone()));
        let reaper = self.service.spawn_session_reaper();

        info!("Starting legaldoc HTTP server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        let actual_addr = listener.local_addr()?;
        info!("Server bound to {}", actual_addr);

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        reaper.abort();
        info!("Server stopped");
        result?;

        Ok(())
    }

    /// Get server address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
