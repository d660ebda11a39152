//! Integration tests for the status, page and demo endpoints

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use axum::http::{header, Method, StatusCode};
use common::{get_request, json_request, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_root_serves_upload_page() {
    let app = TestApp::new().await;

    let response = app.send(get_request("/")).await;

    assert_eq!(response.status, StatusCode::OK);
    let content_type = response.headers.get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/html"));

    let html = response.text();
    assert!(html.contains("/api/upload"));
    assert!(html.contains("accept=\".pdf,.docx,.txt\""));
    assert!(html.contains("max 16MB"));
}

#[tokio::test]
async fn test_status_reports_configuration() {
    let app = TestApp::with_config(|config| {
        config.allowed_extensions = vec!["pdf".to_string()];
    })
    .await;

    let response = app.send(get_request("/api/status")).await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["status"], "running");
    assert_eq!(body["version"], legaldoc::VERSION);
    assert_eq!(body["allowedExtensions"], json!(["pdf"]));
    assert_eq!(body["maxUploadBytes"], 16 * 1024 * 1024);
    assert_eq!(
        body["uploadDir"],
        app.upload_dir().to_string_lossy().to_string()
    );
    assert!(body["uptimeSeconds"].is_u64());
}

#[tokio::test]
async fn test_simplify_returns_fixed_text() {
    let app = TestApp::new().await;

    let response = app
        .send(json_request(
            Method::POST,
            "/simplify",
            json!({ "text": "The lessee shall indemnify the lessor." }),
        ))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["original_length"], 38);

    let simplified = body["simplified_text"].as_str().unwrap();
    assert!(simplified.starts_with("**Simplified Version:**"));
    assert_eq!(
        body["simplified_length"],
        simplified.chars().count() as u64
    );
}

#[tokio::test]
async fn test_simplify_without_text_counts_zero() {
    let app = TestApp::new().await;

    let response = app
        .send(json_request(Method::POST, "/simplify", json!({})))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["original_length"], 0);
}

#[tokio::test]
async fn test_analyze_returns_fixed_risk_report() {
    let app = TestApp::new().await;

    let response = app
        .send(json_request(Method::POST, "/analyze", json!({ "text": "x" })))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["analysis"]["overall_risk"], "Medium");
    assert_eq!(body["analysis"]["risk_score"], 65);
    assert_eq!(
        body["analysis"]["risks"][0],
        json!({
            "category": "Financial Risk",
            "level": "High",
            "description": "Potential liability clauses that could result in significant financial obligations",
            "severity": 75
        })
    );
    assert_eq!(body["analysis"]["recommendations"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_chat_replies_from_fixed_set() {
    let app = TestApp::new().await;

    let response = app
        .send(json_request(
            Method::POST,
            "/chat",
            json!({ "message": "What does clause 4 mean?" }),
        ))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["success"], true);
    let reply = body["response"].as_str().unwrap();
    assert!(legaldoc::http::handlers::canned::CHAT_REPLIES.contains(&reply));
    assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_demo_payload() {
    let app = TestApp::new().await;

    let response = app.send(get_request("/demo")).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(
        body["document_analysis"]["title"],
        "Sample Employment Agreement"
    );
    assert_eq!(body["risk_categories"]["liability"], 60);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new().await;

    let response = app.send(get_request("/api/documents")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
