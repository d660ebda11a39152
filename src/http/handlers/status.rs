//! Status and root endpoint handlers

use crate::core::service::DocumentService;
use crate::http::models::StatusResponse;
use axum::{extract::State, response::Html, Json};
use std::sync::Arc;
use std::time::SystemTime;

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DocumentService>,
    pub start_time: SystemTime,
}

impl AppState {
    pub fn new(service: Arc<DocumentService>) -> Self {
        Self {
            service,
            start_time: SystemTime::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(self.start_time)
            .unwrap_or_default()
            .as_secs()
    }
}

/// GET / - Upload page
pub async fn root(State(state): State<AppState>) -> Html<String> {
    let config = state.service.config();

    let accept = config
        .allowed_extensions
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",");
    let types = config
        .allowed_extensions
        .iter()
        .map(|ext| ext.to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join(", ");
    let limit_mb = config.max_upload_bytes / (1024 * 1024);

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>LegalDoc Upload</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            padding: 20px;
            background: #f5f5f5;
        }}
        .container {{
            max-width: 720px;
            margin: 0 auto;
            background: white;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
            overflow: hidden;
        }}
        .header {{
            background: linear-gradient(135deg, #1e3a8a 0%, #3b82f6 100%);
            color: white;
            padding: 30px;
            text-align: center;
        }}
        .content {{
            padding: 30px;
        }}
        .hint {{
            color: #666;
            margin-top: 5px;
        }}
        #result {{
            margin-top: 20px;
            padding: 15px;
            border-radius: 6px;
            background: #f8f9fa;
            display: none;
        }}
        .footer {{
            text-align: center;
            padding: 20px;
            background: #f8f9fa;
            color: #666;
            font-size: 0.9em;
        }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>LegalDoc</h1>
            <p>Upload a legal document to get started</p>
        </div>

        <div class="content">
            <form id="upload-form">
                <input type="file" name="file" accept="{}">
                <button type="submit">Upload</button>
                <p class="hint">Supported formats: {} (max {}MB)</p>
            </form>
            <div id="result"></div>
        </div>

        <div class="footer">v{}</div>
    </div>
    <script>
        document.getElementById('upload-form').addEventListener('submit', async (event) => {{
            event.preventDefault();
            const result = document.getElementById('result');
            const response = await fetch('/api/upload', {{
                method: 'POST',
                body: new FormData(event.target),
            }});
            const body = await response.json();
            result.style.display = 'block';
            result.textContent = response.ok
                ? `${{body.message}}: ${{body.filename}}`
                : body.error;
        }});
    </script>
</body>
</html>"#,
        accept,
        types,
        limit_mb,
        env!("CARGO_PKG_VERSION"),
    );

    Html(html)
}

/// GET /api/status - Service status endpoint
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let config = state.service.config();

    Json(StatusResponse {
        status: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        upload_dir: config.upload_dir.to_string_lossy().to_string(),
        allowed_extensions: config.allowed_extensions.clone(),
        max_upload_bytes: config.max_upload_bytes,
        uptime_seconds: state.uptime_seconds(),
    })
}
