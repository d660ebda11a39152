//! Request and response models for the HTTP API

use serde::{Deserialize, Serialize};

/// Successful upload acknowledgement
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub message: String,
}

impl UploadResponse {
    pub fn accepted(filename: impl Into<String>) -> Self {
        Self {
            success: true,
            filename: filename.into(),
            message: "File uploaded successfully".to_string(),
        }
    }
}

/// Status response
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub upload_dir: String,
    pub allowed_extensions: Vec<String>,
    pub max_upload_bytes: usize,
    pub uptime_seconds: u64,
}

/// Body of the simplify and analyze endpoints
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DocumentTextRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct SimplifyResponse {
    pub success: bool,
    pub simplified_text: String,
    pub original_length: usize,
    pub simplified_length: usize,
}

#[derive(Debug, Serialize, Clone)]
pub struct RiskItem {
    pub category: String,
    pub level: String,
    pub description: String,
    pub severity: u8,
}

#[derive(Debug, Serialize, Clone)]
pub struct RiskAnalysis {
    pub overall_risk: String,
    pub risk_score: u8,
    pub risks: Vec<RiskItem>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: RiskAnalysis,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    /// RFC 3339 timestamp of the reply
    pub timestamp: String,
}
