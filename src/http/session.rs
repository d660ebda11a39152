//! Session cookie plumbing for axum handlers

use crate::core::config::SessionConfig;
use crate::http::handlers::AppState;
use crate::session::{SessionContext, SessionError, SessionId, SessionTokens};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
};
use std::convert::Infallible;
use tracing::debug;

/// Find a cookie value by name in the request headers
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}

/// Resolve the session carried by `headers`, or start a new one
pub fn resolve_session(
    headers: &HeaderMap,
    cookie_name: &str,
    tokens: &SessionTokens,
) -> SessionContext {
    let resumed = read_cookie(headers, cookie_name).and_then(|token| match tokens.verify(token) {
        Ok(id) => Some(id),
        Err(e) => {
            debug!("Ignoring session cookie: {}", e);
            None
        }
    });

    match resumed {
        Some(id) => SessionContext::resumed(id),
        None => SessionContext::fresh(),
    }
}

/// `Set-Cookie` value handing a signed session id to the client
pub fn session_cookie(
    config: &SessionConfig,
    tokens: &SessionTokens,
    id: &SessionId,
) -> Result<HeaderValue, SessionError> {
    let token = tokens.issue(id)?;
    let cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        config.cookie_name,
        token,
        tokens.ttl().as_secs()
    );
    HeaderValue::from_str(&cookie).map_err(|e| SessionError::Signing(e.to_string()))
}

#[async_trait]
impl FromRequestParts<AppState> for SessionContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(resolve_session(
            &parts.headers,
            &state.service.config().session.cookie_name,
            state.service.session_tokens(),
        ))
    }
}
