//! Document upload endpoint

use crate::core::intake::{IntakeError, UploadCandidate};
use crate::core::service::ServiceError;
use crate::http::errors::{HttpError, HttpResult};
use crate::http::handlers::AppState;
use crate::http::models::UploadResponse;
use crate::http::session::session_cookie;
use crate::session::SessionContext;
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

/// Multipart field carrying the document
pub const FILE_FIELD: &str = "file";

/// POST /api/upload - Accept a single document
pub async fn upload_document(
    State(state): State<AppState>,
    session: SessionContext,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> HttpResult<Response> {
    let intake = state.service.intake();

    let declared_length = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());
    intake.gate().check_declared_length(declared_length)?;

    let mut multipart = multipart.map_err(|e| HttpError::BadRequest(e.body_text()))?;
    let limit = intake.gate().max_bytes();

    let mut candidate = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        // Only parts carrying a filename parameter are files; a plain form
        // value named `file` does not count as an upload
        let filename = match (field.name(), field.file_name()) {
            (Some(FILE_FIELD), Some(filename)) => filename.to_string(),
            (name, _) => {
                debug!("Skipping multipart field {:?}", name);
                continue;
            }
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, limit))?;
        candidate = Some(UploadCandidate::new(filename, data.to_vec()));
        break;
    }

    let candidate = candidate
        .ok_or(IntakeError::MissingFile)?
        .with_declared_length(declared_length);

    let document = intake.accept(&session, candidate).await?;

    // Re-issued on every accepted upload so the cookie's expiry tracks activity
    let cookie = session_cookie(
        &state.service.config().session,
        state.service.session_tokens(),
        session.id(),
    )
    .map_err(ServiceError::from)?;
    if session.is_new() {
        debug!("Started session {}", session.id());
    }

    let mut response = Json(UploadResponse::accepted(document.filename.as_str())).into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);

    Ok(response)
}

fn multipart_error(err: MultipartError, limit: usize) -> HttpError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        IntakeError::TooLarge { limit }.into()
    } else {
        HttpError::BadRequest(format!("Failed to read multipart body: {}", err.body_text()))
    }
}
