//! Fixed-response endpoints backing the demo UI
//!
//! None of these look at the document; they return the same payloads for
//! every request.

use crate::http::models::{
    AnalyzeResponse, ChatRequest, ChatResponse, DocumentTextRequest, RiskAnalysis, RiskItem,
    SimplifyResponse,
};
use axum::Json;
use rand::seq::IndexedRandom;
use serde_json::{json, Value};

const SIMPLIFIED_TEXT: &str = "**Simplified Version:**\n\nThis legal document has been simplified for easier understanding. The original complex legal language has been converted to plain English while maintaining the core meaning and legal intent.\n\n**Key Points:**\n- Main obligations and rights are clearly outlined\n- Technical jargon has been replaced with everyday language\n- Important dates and deadlines are highlighted\n- Potential consequences are explained in simple terms";

pub const CHAT_REPLIES: [&str; 4] = [
    "Based on the document you uploaded, I can help clarify that provision. It means that both parties agree to resolve disputes through mediation before pursuing litigation.",
    "That's a great question! The clause you're referring to is a standard indemnification clause, which protects one party from legal liability in specific situations.",
    "From my analysis of the document, this section outlines the payment terms and conditions. The net-30 terms mean payment is due within 30 days of invoice.",
    "This particular clause is important because it defines the scope of work and deliverables. Make sure you understand all the obligations listed here.",
];

/// POST /simplify
pub async fn simplify(Json(request): Json<DocumentTextRequest>) -> Json<SimplifyResponse> {
    Json(SimplifyResponse {
        success: true,
        simplified_text: SIMPLIFIED_TEXT.to_string(),
        original_length: request.text.chars().count(),
        simplified_length: SIMPLIFIED_TEXT.chars().count(),
    })
}

/// POST /analyze
pub async fn analyze(Json(_request): Json<DocumentTextRequest>) -> Json<AnalyzeResponse> {
    Json(AnalyzeResponse {
        success: true,
        analysis: risk_analysis(),
    })
}

fn risk_analysis() -> RiskAnalysis {
    let risk = |category: &str, level: &str, description: &str, severity: u8| RiskItem {
        category: category.to_string(),
        level: level.to_string(),
        description: description.to_string(),
        severity,
    };

    RiskAnalysis {
        overall_risk: "Medium".to_string(),
        risk_score: 65,
        risks: vec![
            risk(
                "Financial Risk",
                "High",
                "Potential liability clauses that could result in significant financial obligations",
                75,
            ),
            risk(
                "Compliance Risk",
                "Medium",
                "Some regulatory requirements may need additional verification",
                55,
            ),
            risk(
                "Termination Risk",
                "Low",
                "Contract termination clauses appear balanced and reasonable",
                30,
            ),
        ],
        recommendations: vec![
            "Review financial liability caps with legal counsel".to_string(),
            "Verify compliance requirements with regulatory team".to_string(),
            "Consider negotiating more favorable payment terms".to_string(),
        ],
    }
}

/// POST /chat
pub async fn chat(Json(_request): Json<ChatRequest>) -> Json<ChatResponse> {
    let reply = CHAT_REPLIES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(CHAT_REPLIES[0]);

    Json(ChatResponse {
        success: true,
        response: reply.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /demo
pub async fn demo() -> Json<Value> {
    Json(json!({
        "document_analysis": {
            "title": "Sample Employment Agreement",
            "date_analyzed": "2025-10-08",
            "risk_level": "Medium",
            "risk_score": 65,
            "page_count": 12,
            "word_count": 4500
        },
        "simplified_preview": "This employment agreement establishes the terms of employment between the company and the employee...",
        "risk_categories": {
            "financial": 75,
            "compliance": 55,
            "termination": 30,
            "liability": 60
        }
    }))
}
